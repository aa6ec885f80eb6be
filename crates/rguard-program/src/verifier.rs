//! # Proof Verification Seam
//!
//! The admission program validates eligibility proofs through the
//! [`ProofVerifier`] trait and is otherwise independent of the concrete
//! proof scheme. A production deployment plugs in a real zero-knowledge
//! verifier; this crate ships two implementations:
//!
//! - [`DigestProofVerifier`] — the deterministic development scheme. A
//!   proof is the raw bytes of the proof transcript digest
//!   (`rguard_core::proof_transcript_digest`). Transparent, **not
//!   private** — anyone can recompute it. It exists so the admission flow
//!   is exercisable end-to-end before a real backend lands.
//! - [`AcceptAllVerifier`] — test double that approves everything.

use rguard_core::{proof_transcript_digest, ProofContext};

/// Validates an eligibility proof against the parameters it binds to.
///
/// Implementations must be pure with respect to program state: `verify`
/// is called before any mutation, and its answer must depend only on the
/// context and proof bytes.
pub trait ProofVerifier {
    /// Whether `proof` is valid for `context`.
    fn verify(&self, context: &ProofContext, proof: &[u8]) -> bool;
}

/// Deterministic digest-based proof verification.
///
/// Valid proofs are exactly the 32 transcript bytes for the context. The
/// paired producer lives in the client crate; both sides derive the
/// transcript independently from `rguard-core`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestProofVerifier;

impl ProofVerifier for DigestProofVerifier {
    fn verify(&self, context: &ProofContext, proof: &[u8]) -> bool {
        proof == proof_transcript_digest(context).as_bytes()
    }
}

/// Approves every proof. Test-only convenience for exercising the
/// program's other rejection rules in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

impl ProofVerifier for AcceptAllVerifier {
    fn verify(&self, _context: &ProofContext, _proof: &[u8]) -> bool {
        true
    }
}
