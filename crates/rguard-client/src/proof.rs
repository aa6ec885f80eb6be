//! # Proof Producer Seam
//!
//! The orchestrator obtains eligibility proofs through the
//! [`ProofProducer`] trait and never inspects them — proof bytes flow
//! straight into the submission. A production deployment plugs in a real
//! zero-knowledge prover; [`DigestProofProducer`] is the deterministic
//! development scheme paired with the program's digest verifier.

use rguard_core::{proof_transcript_digest, ProofContext};

/// Errors from proof generation.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// The prover failed to produce a proof for the given parameters.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// Produces an eligibility proof bound to a [`ProofContext`].
///
/// Generation is a suspension point: real provers are remote or slow, so
/// the operation is async and may fail.
pub trait ProofProducer {
    /// Produce proof bytes for `context`.
    fn produce(
        &self,
        context: &ProofContext,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ProofError>> + Send;
}

/// Deterministic digest-based proof generation.
///
/// Emits the 32 transcript bytes for the context — the exact value the
/// program's `DigestProofVerifier` expects. Transparent, **not private**;
/// a development stand-in only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestProofProducer;

impl ProofProducer for DigestProofProducer {
    async fn produce(&self, context: &ProofContext) -> Result<Vec<u8>, ProofError> {
        Ok(proof_transcript_digest(context).as_bytes().to_vec())
    }
}
