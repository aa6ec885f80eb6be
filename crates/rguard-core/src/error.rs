//! # Validation Errors
//!
//! Construction-time errors for the newtypes in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error constructing a validated core type.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Region code failed format validation.
    #[error("invalid region code: {0:?} (expected 2-16 ASCII alphanumeric or '-' characters)")]
    InvalidRegionCode(String),

    /// A 32-byte digest string failed hex decoding.
    #[error("invalid digest: {0:?} (expected 64 hex characters, optionally 0x-prefixed)")]
    InvalidDigest(String),

    /// An address string failed hex decoding.
    #[error("invalid address: {0:?} (expected 40 hex characters, optionally 0x-prefixed)")]
    InvalidAddress(String),
}
