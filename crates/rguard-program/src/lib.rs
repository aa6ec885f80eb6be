//! # rguard-program — The Ledger-Resident Admission Program
//!
//! The admission state machine that lives on the host ledger. It owns all
//! persistent admission state:
//!
//! - **[`RegionRegistry`]** — per-region capacity and occupancy.
//! - **[`NullifierRegistry`]** — consumed one-time membership credentials.
//! - **Access records** — which identities hold membership (never reset).
//! - **Admin roles** — who may mutate region capacity.
//! - **[`AdmissionGranted`] events** — the auditable admission log.
//!
//! ## Execution Model
//!
//! The program relies entirely on the host ledger's serialized execution:
//! every state-mutating operation takes `&mut self` and is applied as an
//! indivisible unit in ledger order. The program performs no interior
//! locking and makes no assumption of single-writer access on the client
//! side — whichever request the ledger orders first for a region's last
//! slot wins, and the next receives [`AdmissionError::RegionFull`].
//!
//! ## Atomicity
//!
//! `request_admission` runs its rejection checks before any mutation.
//! Every failure leaves the nullifier registry, occupancy counters, and
//! access records exactly as they were — no partial admission is ever
//! observable.

pub mod error;
pub mod event;
pub mod program;
pub mod registry;
pub mod verifier;

// Re-export primary types.
pub use error::AdmissionError;
pub use event::AdmissionGranted;
pub use program::AdmissionProgram;
pub use registry::{NullifierRegistry, RegionRegistry};
pub use verifier::{AcceptAllVerifier, DigestProofVerifier, ProofVerifier};
