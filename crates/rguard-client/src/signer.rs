//! # Credential Sources and Identity Binding
//!
//! The orchestrator accepts either an embedded Ed25519 signer (tests,
//! server-side automation) or an externally injected provider handle
//! (browser-wallet style). The variant is chosen once at construction —
//! there is no runtime type-sniffing of an arbitrary input value — and
//! resolves to the caller [`Address`] on first use.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use rand_core::OsRng;

use rguard_core::Address;

/// An externally supplied signing capability.
///
/// Models a browser-injected wallet: the handle may or may not currently
/// expose an identity (the user can decline the connection), so
/// resolution is fallible.
pub trait IdentityProvider: Send + Sync {
    /// The address the provider is currently bound to, if any.
    fn address(&self) -> Option<Address>;
}

/// Where the orchestrator's signing identity comes from.
pub enum CredentialSource {
    /// An in-process Ed25519 keypair.
    EmbeddedSigner(SigningKey),
    /// An injected provider handle (browser-wallet style).
    InjectedProvider(Arc<dyn IdentityProvider>),
}

impl CredentialSource {
    /// Generate a fresh embedded signer.
    pub fn generate() -> Self {
        Self::EmbeddedSigner(SigningKey::generate(&mut OsRng))
    }

    /// Resolve the caller address, if the source currently exposes one.
    ///
    /// Embedded signers always resolve (the address is derived from the
    /// verifying key). Injected providers may yield `None`.
    pub fn resolve_address(&self) -> Option<Address> {
        match self {
            Self::EmbeddedSigner(key) => Some(Address::from_public_key_bytes(
                key.verifying_key().as_bytes(),
            )),
            Self::InjectedProvider(handle) => handle.address(),
        }
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmbeddedSigner(_) => f.write_str("CredentialSource::EmbeddedSigner(..)"),
            Self::InjectedProvider(_) => f.write_str("CredentialSource::InjectedProvider(..)"),
        }
    }
}
