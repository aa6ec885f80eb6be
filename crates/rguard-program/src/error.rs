//! # Admission Program Errors
//!
//! The rejection taxonomy of the admission program. Every variant is a
//! business-rule rejection: retrying the same inputs will deterministically
//! fail again, so none of these are retried automatically by clients.
//! All rejections leave program state unchanged.

use thiserror::Error;

/// A rejection from the admission program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// Caller lacks the admin role required for capacity mutation.
    #[error("unauthorized: caller does not hold the admin role")]
    Unauthorized,

    /// The supplied proof failed verification.
    #[error("invalid proof: verification failed for the supplied proof bytes")]
    InvalidProof,

    /// The nullifier has already been consumed by a prior admission.
    #[error("credential already used: nullifier was consumed by a prior admission")]
    DuplicateCredential,

    /// The caller already holds membership.
    #[error("wallet already has access: identity was admitted previously")]
    AlreadyMember,

    /// The region has no remaining capacity.
    #[error("region full: occupancy has reached capacity")]
    RegionFull,
}
