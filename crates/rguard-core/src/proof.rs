//! # Proof Transcript Binding
//!
//! [`ProofContext`] is the parameter triple an eligibility proof binds to:
//! the caller identity, the target region, and the membership nullifier.
//! Proof producers receive it when generating a proof; the admission
//! program's verifier receives the same triple when checking one. Both
//! sides are otherwise opaque to each other — the concrete proof scheme is
//! a pluggable collaborator.
//!
//! [`proof_transcript_digest`] is the deterministic transcript used by the
//! built-in digest-based proof system (the development stand-in for a real
//! zero-knowledge backend). Production schemes ignore it.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::hash::{Hash32, Sha256Accumulator};

/// Fixed domain-separation label for proof transcripts.
pub const PROOF_DOMAIN: &str = "region-guard/proof/v1";

/// The parameters an eligibility proof binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofContext {
    /// The caller requesting admission.
    pub identity: Address,
    /// The region identifier (derived from the region code).
    pub region_id: Hash32,
    /// The membership nullifier (derived from the identity).
    pub nullifier: Hash32,
}

/// Compute the deterministic proof transcript for a context.
///
/// `SHA-256(PROOF_DOMAIN || identity || region_id || nullifier)` over the
/// raw bytes of each component. Producer and verifier of the digest-based
/// proof system both derive this value independently; a proof is valid iff
/// it equals the transcript.
pub fn proof_transcript_digest(context: &ProofContext) -> Hash32 {
    let mut acc = Sha256Accumulator::new();
    acc.update(PROOF_DOMAIN.as_bytes());
    acc.update(context.identity.as_bytes());
    acc.update(context.region_id.as_bytes());
    acc.update(context.nullifier.as_bytes());
    acc.finalize()
}
