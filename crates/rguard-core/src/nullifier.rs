//! # Membership Nullifiers
//!
//! A nullifier is the one-time credential consumed by a successful
//! admission. It is derived deterministically from the caller identity and
//! a fixed domain-separation label, so:
//!
//! - the same identity always derives the same nullifier (replaying an
//!   admission is detectable), and
//! - nullifiers from this stack can never collide with digests computed
//!   for any other purpose (the label separates the domains).
//!
//! The registry side (consume-at-most-once) lives in the admission program;
//! this module owns only the derivation.

use crate::address::Address;
use crate::hash::{Hash32, Sha256Accumulator};

/// Fixed domain-separation label for membership nullifiers.
pub const MEMBERSHIP_LABEL: &str = "region-guard/membership/v1";

/// Derive the membership nullifier for an identity.
///
/// `SHA-256(address_hex || MEMBERSHIP_LABEL)` over the canonical
/// `0x`-prefixed lowercase address rendering. One nullifier per identity,
/// globally — admission to any region consumes it.
pub fn membership_nullifier(identity: &Address) -> Hash32 {
    let mut acc = Sha256Accumulator::new();
    acc.update(identity.to_string().as_bytes());
    acc.update(MEMBERSHIP_LABEL.as_bytes());
    acc.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullifier_is_deterministic() {
        let identity = Address::from_public_key_bytes(b"nullifier-key");
        assert_eq!(
            membership_nullifier(&identity),
            membership_nullifier(&identity)
        );
    }

    #[test]
    fn nullifier_differs_per_identity() {
        let a = Address::from_public_key_bytes(b"identity-a");
        let b = Address::from_public_key_bytes(b"identity-b");
        assert_ne!(membership_nullifier(&a), membership_nullifier(&b));
    }

    #[test]
    fn nullifier_is_domain_separated() {
        // The derivation must not equal a bare digest of the address
        // rendering — the label has to participate.
        let identity = Address::from_public_key_bytes(b"separated");
        let bare = Hash32::digest(identity.to_string().as_bytes());
        assert_ne!(membership_nullifier(&identity), bare);
    }

    #[test]
    fn nullifier_matches_manual_concatenation() {
        let identity = Address::from_public_key_bytes(b"manual");
        let mut concatenated = identity.to_string().into_bytes();
        concatenated.extend_from_slice(MEMBERSHIP_LABEL.as_bytes());
        assert_eq!(
            membership_nullifier(&identity),
            Hash32::digest(&concatenated)
        );
    }
}
