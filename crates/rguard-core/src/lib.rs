//! # rguard-core — Foundational Types for the Region Guard Stack
//!
//! This crate provides the building blocks shared by the admission program
//! and the client orchestrator:
//!
//! - **[`Hash32`]** — the 32-byte SHA-256 digest newtype used for region
//!   identifiers, nullifiers, and proof transcripts.
//! - **[`Address`]** — the 20-byte caller identity, derived from a public
//!   key digest.
//! - **[`RegionCode`]** — validated human-readable region codes and the
//!   single `region_id` derivation used by every caller.
//! - **[`membership_nullifier`]** — the one-time membership credential
//!   derivation with its fixed domain-separation label.
//! - **[`ProofContext`]** — the (identity, region, nullifier) triple that
//!   proof producers and verifiers bind to.
//!
//! ## Design Principle
//!
//! Every identifier derivation lives here and nowhere else. Administration,
//! submission, and queries all obtain a region identifier through
//! [`RegionCode::region_id`], so the same human-readable code always maps
//! to the same on-ledger identifier.

pub mod address;
pub mod error;
pub mod hash;
pub mod nullifier;
pub mod proof;
pub mod region;

// Re-export primary types.
pub use address::Address;
pub use error::ValidationError;
pub use hash::{Hash32, Sha256Accumulator};
pub use nullifier::{membership_nullifier, MEMBERSHIP_LABEL};
pub use proof::{proof_transcript_digest, ProofContext, PROOF_DOMAIN};
pub use region::RegionCode;
