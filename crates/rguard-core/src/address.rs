//! # Caller Address Newtype
//!
//! A 20-byte identity derived from a public key digest. Addresses are the
//! unit of membership: access records and nullifiers key off them.
//!
//! ## Derivation
//!
//! `address = SHA-256(public_key_bytes)[..20]` — deterministic, so the same
//! signing key always binds to the same address. The derivation accepts raw
//! public key bytes rather than a key type to keep this crate free of any
//! particular signature scheme.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// A 20-byte caller identity.
///
/// Displayed as `0x`-prefixed lowercase hex. The all-zero address is a
/// valid value (used as a probe identity by connectivity checks) but is
/// never derived from a real key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive an address from public key bytes.
    ///
    /// Takes the first 20 bytes of `SHA-256(public_key_bytes)`.
    pub fn from_public_key_bytes(public_key: &[u8]) -> Self {
        let hash = Sha256::digest(public_key);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[..20]);
        Self(bytes)
    }

    /// Access the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render the address as lowercase hex without a prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse an address from a hex string, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] unless the input is
    /// exactly 40 hex characters after stripping the prefix.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let stripped = value.strip_prefix("0x").unwrap_or(value);
        if stripped.len() != 40 {
            return Err(ValidationError::InvalidAddress(value.to_string()));
        }
        let mut bytes = [0u8; 20];
        for (i, chunk) in stripped.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::InvalidAddress(value.to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| ValidationError::InvalidAddress(value.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = Address::from_public_key_bytes(b"some-public-key-bytes");
        let b = Address::from_public_key_bytes(b"some-public-key-bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn derivation_differs_per_key() {
        let a = Address::from_public_key_bytes(b"key-one");
        let b = Address::from_public_key_bytes(b"key-two");
        assert_ne!(a, b);
    }

    #[test]
    fn hex_roundtrip() {
        let addr = Address::from_public_key_bytes(b"roundtrip");
        let parsed = Address::from_hex(&addr.to_hex()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let addr = Address::from_public_key_bytes(b"prefixed");
        let parsed = Address::from_hex(&format!("0x{}", addr.to_hex())).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn from_hex_rejects_invalid() {
        assert!(Address::from_hex("").is_err());
        assert!(Address::from_hex("0x1234").is_err()); // too short
        assert!(Address::from_hex(&"z".repeat(40)).is_err()); // non-hex
        assert!(Address::from_hex(&"a".repeat(41)).is_err()); // too long
    }

    #[test]
    fn zero_address_display() {
        assert_eq!(
            Address::ZERO.to_string(),
            format!("0x{}", "0".repeat(40))
        );
    }

    #[test]
    fn display_parse_roundtrip() {
        let addr = Address::from_public_key_bytes(b"display");
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn serde_roundtrip() {
        let addr = Address::from_public_key_bytes(b"serde");
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }

    #[test]
    fn address_in_hashset() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Address::from_public_key_bytes(b"a"));
        set.insert(Address::from_public_key_bytes(b"b"));
        set.insert(Address::from_public_key_bytes(b"a"));
        assert_eq!(set.len(), 2);
    }
}
