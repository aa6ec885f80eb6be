//! # Region Codes and Region Identifiers
//!
//! [`RegionCode`] is the human-readable administrative bucket identifier,
//! typically an ISO 3166-1 country code (`NG`, `US`) or a short zone code.
//! The on-ledger identifier is always [`RegionCode::region_id`] — the
//! SHA-256 digest of the code bytes. Administration, submission, and
//! queries all derive identifiers through this one function, so a region
//! can never be addressed under two different identifiers.
//!
//! ## Validation
//!
//! Codes are trimmed and stored uppercase. Accepted: 2-16 ASCII
//! alphanumeric or `-` characters.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::hash::Hash32;

/// A validated human-readable region code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCode(String);

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl RegionCode {
    /// Create a region code from a string, validating format.
    ///
    /// The value is trimmed and stored uppercase: `"ng"` and `"NG"` name
    /// the same region and derive the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRegionCode`] unless the trimmed
    /// value is 2-16 ASCII alphanumeric or `-` characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();
        if upper.len() < 2 || upper.len() > 16 {
            return Err(ValidationError::InvalidRegionCode(raw));
        }
        if !upper
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ValidationError::InvalidRegionCode(raw));
        }
        Ok(Self(upper))
    }

    /// Access the canonical (uppercase) code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the on-ledger region identifier: `SHA-256(code_bytes)`.
    ///
    /// This is the single derivation used by every caller. Deterministic:
    /// the same code always maps to the same identifier.
    pub fn region_id(&self) -> Hash32 {
        Hash32::digest(self.0.as_bytes())
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RegionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
