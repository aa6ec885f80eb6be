//! # Orchestrator Errors
//!
//! The client-facing error taxonomy. Three families:
//!
//! - **Setup/environment** (`NoSignerAvailable`, `Directory`, `Oracle`,
//!   `Proof`, `Timeout`) — fatal to the current call, safe to retry after
//!   fixing the cause; no ledger state was touched.
//! - **Business-rule rejections** (`Rejected`) — surfaced verbatim from
//!   the admission program; never retried automatically, the same inputs
//!   fail the same way.
//! - **Ledger-layer** (`Submission`, `FinalityExhausted`) — the
//!   submission's fate may be ambiguous; the orchestrator resolves the
//!   ambiguity through the membership record before reporting.
//!
//! `AlreadyMember`/`DuplicateCredential` do not appear here as failures of
//! `join_region`: re-entry by an admitted identity is an expected terminal
//! state and is reported as a successful
//! [`AdmissionReceipt`](crate::AdmissionReceipt) instead.

use thiserror::Error;

use rguard_core::ValidationError;
use rguard_program::AdmissionError;

use crate::directory::DirectoryError;
use crate::oracle::OracleError;
use crate::proof::ProofError;

/// The off-chain workflow step a timeout occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    /// Service-directory resolution of the oracle address.
    ResolveOracle,
    /// Eligibility oracle query.
    CheckEligibility,
    /// Proof generation.
    ProduceProof,
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResolveOracle => f.write_str("oracle address resolution"),
            Self::CheckEligibility => f.write_str("eligibility check"),
            Self::ProduceProof => f.write_str("proof generation"),
        }
    }
}

/// Failure of the join-region workflow.
#[derive(Debug, Error)]
pub enum JoinError {
    /// Neither an embedded signer nor a connected injected provider is
    /// available.
    #[error("no valid signer found: pass an embedded signer or a connected provider")]
    NoSignerAvailable,

    /// The supplied region code failed validation.
    #[error("invalid region code: {0}")]
    InvalidRegionCode(#[from] ValidationError),

    /// Service directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The identity is not eligible on the network. No on-ledger cost was
    /// incurred — the workflow short-circuits before proof generation.
    #[error("access denied: identity is not eligible on the network")]
    NotEligible,

    /// The eligibility oracle could not be queried.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Proof generation failed.
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// The admission program rejected the submission.
    #[error("admission rejected: {0}")]
    Rejected(AdmissionError),

    /// Network or ledger-layer failure with the identity not recorded as
    /// a member. Safe to retry once the cause is fixed.
    #[error("submission failed: {0}")]
    Submission(String),

    /// An off-chain step exceeded its configured timeout. No submission
    /// was made.
    #[error("timed out during {step}")]
    Timeout {
        /// The step that timed out.
        step: WorkflowStep,
    },

    /// The submission was ordered but did not finalize within the
    /// configured policy. The state change may still become durable.
    #[error("submission not finalized after {attempts} confirmation polls")]
    FinalityExhausted {
        /// Number of polls performed.
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_steps_name_themselves() {
        assert_eq!(
            WorkflowStep::ResolveOracle.to_string(),
            "oracle address resolution"
        );
        assert_eq!(WorkflowStep::CheckEligibility.to_string(), "eligibility check");
        assert_eq!(WorkflowStep::ProduceProof.to_string(), "proof generation");
    }

    #[test]
    fn timeout_display_includes_step() {
        let err = JoinError::Timeout {
            step: WorkflowStep::CheckEligibility,
        };
        assert!(err.to_string().contains("eligibility check"));
    }

    #[test]
    fn rejected_display_carries_program_message() {
        let err = JoinError::Rejected(AdmissionError::RegionFull);
        assert!(err.to_string().contains("region full"));
    }
}
