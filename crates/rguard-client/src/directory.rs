//! # Service Directory Client
//!
//! Name → address resolution for discovering the eligibility oracle's
//! current deployment. The directory is read-only from the orchestrator's
//! perspective; registrations are mutated by deployment flows outside this
//! crate.
//!
//! [`HttpDirectory`] talks to a directory service over HTTP;
//! [`StaticDirectory`] is the in-memory implementation used by tests and
//! the CLI demo.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// Errors from service directory resolution.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The name has no current registration.
    #[error("unknown service: no registration for {0:?}")]
    UnknownService(String),
    /// HTTP transport error.
    #[error("HTTP error resolving {name:?}: {source}")]
    Http {
        name: String,
        source: reqwest::Error,
    },
    /// The directory returned an address that does not parse as a URL.
    #[error("malformed address for {name:?}: {value:?}")]
    MalformedAddress { name: String, value: String },
}

/// Resolves a logical service name to its current network address.
pub trait ServiceDirectory {
    /// Resolve `name`, failing with [`DirectoryError::UnknownService`] if
    /// it has no current registration.
    fn resolve(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Url, DirectoryError>> + Send;
}

/// In-memory directory with fixed registrations.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: HashMap<String, Url>,
}

impl StaticDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service address, returning the directory for chaining.
    pub fn with_entry(mut self, name: impl Into<String>, address: Url) -> Self {
        self.entries.insert(name.into(), address);
        self
    }
}

impl ServiceDirectory for StaticDirectory {
    async fn resolve(&self, name: &str) -> Result<Url, DirectoryError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownService(name.to_string()))
    }
}

#[derive(Deserialize)]
struct ResolveResponse {
    address: String,
}

/// HTTP client for a remote directory service.
///
/// Resolution is `GET {base}/contracts/{name}`; the service answers
/// `{"address": "<url>"}` or 404 for unregistered names.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    base: Url,
    http: reqwest::Client,
}

impl HttpDirectory {
    /// Create a directory client against a base address.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }
}

impl ServiceDirectory for HttpDirectory {
    async fn resolve(&self, name: &str) -> Result<Url, DirectoryError> {
        let endpoint = self
            .base
            .join(&format!("contracts/{name}"))
            .map_err(|_| DirectoryError::MalformedAddress {
                name: name.to_string(),
                value: format!("{}contracts/{name}", self.base),
            })?;

        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|source| DirectoryError::Http {
                name: name.to_string(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::UnknownService(name.to_string()));
        }

        let body: ResolveResponse = response
            .error_for_status()
            .map_err(|source| DirectoryError::Http {
                name: name.to_string(),
                source,
            })?
            .json()
            .await
            .map_err(|source| DirectoryError::Http {
                name: name.to_string(),
                source,
            })?;

        Url::parse(&body.address).map_err(|_| DirectoryError::MalformedAddress {
            name: name.to_string(),
            value: body.address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_directory_resolves_registered_name() {
        let oracle = Url::parse("http://oracle.test/").unwrap();
        let directory = StaticDirectory::new().with_entry("permission", oracle.clone());
        let resolved = directory.resolve("permission").await.unwrap();
        assert_eq!(resolved, oracle);
    }

    #[tokio::test]
    async fn static_directory_unknown_name_fails() {
        let directory = StaticDirectory::new();
        let result = directory.resolve("permission").await;
        assert!(matches!(result, Err(DirectoryError::UnknownService(_))));
    }
}
