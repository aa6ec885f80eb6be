//! # 32-Byte Digest Newtype
//!
//! [`Hash32`] is the fixed-size digest value used throughout the stack:
//! region identifiers, membership nullifiers, and proof transcripts are all
//! SHA-256 outputs. The newtype serializes as a lowercase hex string and
//! accepts an optional `0x` prefix on parse.
//!
//! [`Sha256Accumulator`] is the streaming digest path for composite inputs
//! (domain label || part || part), so derivations never concatenate into an
//! intermediate buffer.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// A 32-byte SHA-256 digest.
///
/// Displayed as `0x`-prefixed lowercase hex. Equality and hashing operate
/// on the raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-256 digest of a single byte slice.
    pub fn digest(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as lowercase hex without a prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from a hex string, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDigest`] unless the input is
    /// exactly 64 hex characters after stripping the prefix.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let stripped = value.strip_prefix("0x").unwrap_or(value);
        if stripped.len() != 64 {
            return Err(ValidationError::InvalidDigest(value.to_string()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in stripped.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::InvalidDigest(value.to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| ValidationError::InvalidDigest(value.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::str::FromStr for Hash32 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Hash32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for Hash32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Streaming SHA-256 accumulator for composite digest inputs.
///
/// Used by the derivation functions that hash a domain label followed by
/// one or more value parts. `update` calls are order-sensitive: the digest
/// covers the exact byte sequence fed in.
pub struct Sha256Accumulator {
    inner: Sha256,
}

impl Sha256Accumulator {
    /// Start a fresh accumulator.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Feed bytes into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize into a [`Hash32`].
    pub fn finalize(self) -> Hash32 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Hash32::from_bytes(bytes)
    }

    /// Finalize and render as lowercase hex.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

impl Default for Sha256Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = Hash32::digest(b"NG");
        let b = Hash32::digest(b"NG");
        assert_eq!(a, b);
    }

    #[test]
    fn digest_differs_per_input() {
        assert_ne!(Hash32::digest(b"NG"), Hash32::digest(b"US"));
    }

    #[test]
    fn known_sha256_vector() {
        // SHA256("abc") — verified against Python hashlib.sha256(b"abc").hexdigest()
        let digest = Hash32::digest(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hex_roundtrip() {
        let digest = Hash32::digest(b"roundtrip");
        let parsed = Hash32::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let digest = Hash32::digest(b"prefixed");
        let parsed = Hash32::from_hex(&format!("0x{}", digest.to_hex())).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn from_hex_rejects_invalid() {
        assert!(Hash32::from_hex("").is_err());
        assert!(Hash32::from_hex("abcd").is_err()); // too short
        assert!(Hash32::from_hex(&"g".repeat(64)).is_err()); // non-hex
        assert!(Hash32::from_hex(&"a".repeat(65)).is_err()); // too long
    }

    #[test]
    fn display_is_0x_prefixed() {
        let digest = Hash32::digest(b"display");
        let shown = format!("{digest}");
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.len(), 2 + 64);
    }

    #[test]
    fn serde_roundtrip() {
        let digest = Hash32::digest(b"serde");
        let json = serde_json::to_string(&digest).unwrap();
        let back: Hash32 = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, back);
    }

    #[test]
    fn serde_rejects_malformed() {
        let result: Result<Hash32, _> = serde_json::from_str("\"0xnothex\"");
        assert!(result.is_err());
    }

    #[test]
    fn accumulator_matches_single_shot() {
        let mut acc = Sha256Accumulator::new();
        acc.update(b"region");
        acc.update(b"-guard");
        assert_eq!(acc.finalize(), Hash32::digest(b"region-guard"));
    }

    #[test]
    fn accumulator_hex_is_64_chars() {
        let mut acc = Sha256Accumulator::new();
        acc.update(b"anything");
        let hex = acc.finalize_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_roundtrip_arbitrary_bytes(bytes in proptest::array::uniform32(any::<u8>())) {
                let digest = Hash32::from_bytes(bytes);
                prop_assert_eq!(Hash32::from_hex(&digest.to_hex()).unwrap(), digest);
                prop_assert_eq!(digest.to_string().parse::<Hash32>().unwrap(), digest);
            }

            #[test]
            fn accumulator_split_is_position_invariant(data in proptest::collection::vec(any::<u8>(), 0..256), split in 0usize..256) {
                let split = split.min(data.len());
                let mut acc = Sha256Accumulator::new();
                acc.update(&data[..split]);
                acc.update(&data[split..]);
                prop_assert_eq!(acc.finalize(), Hash32::digest(&data));
            }
        }
    }
}
