//! # Eligibility Oracle Client
//!
//! Read-only query wrapper around the external allowlist/KYC service. The
//! oracle answers one question: is this identity currently eligible on the
//! network? The orchestrator re-asks on every join attempt — eligibility
//! can change between calls, so the answer is never cached.
//!
//! The oracle's *endpoint* is discovered through the service directory and
//! passed into each query; the client itself is endpoint-agnostic.

use std::collections::HashSet;

use serde::Deserialize;
use url::Url;

use rguard_core::Address;

/// Errors from eligibility oracle queries.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP transport error.
    #[error("HTTP error querying oracle at {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The oracle endpoint could not be combined with the query path.
    #[error("invalid oracle endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Answers whether an identity satisfies the network's prerequisite check.
pub trait EligibilityOracle {
    /// Query eligibility of `identity` against the oracle at `endpoint`.
    fn is_eligible(
        &self,
        endpoint: &Url,
        identity: &Address,
    ) -> impl std::future::Future<Output = Result<bool, OracleError>> + Send;
}

/// In-memory oracle backed by a fixed allowlist. The endpoint is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    allowed: HashSet<Address>,
}

impl StaticOracle {
    /// Create an oracle that considers nobody eligible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identity as eligible, returning the oracle for chaining.
    pub fn allow(mut self, identity: Address) -> Self {
        self.allowed.insert(identity);
        self
    }
}

impl EligibilityOracle for StaticOracle {
    async fn is_eligible(&self, _endpoint: &Url, identity: &Address) -> Result<bool, OracleError> {
        Ok(self.allowed.contains(identity))
    }
}

#[derive(Deserialize)]
struct EligibilityResponse {
    allowed: bool,
}

/// HTTP client for a remote eligibility oracle.
///
/// Queries `GET {endpoint}/allowed/{address}`; the service answers
/// `{"allowed": <bool>}`.
#[derive(Debug, Clone, Default)]
pub struct HttpOracle {
    http: reqwest::Client,
}

impl HttpOracle {
    /// Create an oracle client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EligibilityOracle for HttpOracle {
    async fn is_eligible(&self, endpoint: &Url, identity: &Address) -> Result<bool, OracleError> {
        let query = endpoint
            .join(&format!("allowed/{identity}"))
            .map_err(|_| OracleError::InvalidEndpoint(endpoint.to_string()))?;

        let body: EligibilityResponse = self
            .http
            .get(query)
            .send()
            .await
            .map_err(|source| OracleError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?
            .error_for_status()
            .map_err(|source| OracleError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?
            .json()
            .await
            .map_err(|source| OracleError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(body.allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("http://oracle.test/").unwrap()
    }

    #[tokio::test]
    async fn static_oracle_allows_listed_identity() {
        let identity = Address::from_public_key_bytes(b"kyc-passed");
        let oracle = StaticOracle::new().allow(identity);
        assert!(oracle.is_eligible(&endpoint(), &identity).await.unwrap());
    }

    #[tokio::test]
    async fn static_oracle_denies_unlisted_identity() {
        let oracle = StaticOracle::new();
        let identity = Address::from_public_key_bytes(b"kyc-missing");
        assert!(!oracle.is_eligible(&endpoint(), &identity).await.unwrap());
    }
}
