//! # Orchestrator Configuration
//!
//! Every deployment-specific value is passed in explicitly at
//! construction: the admission program's network address, the service
//! directory's address, per-step timeouts, and the finality-wait policy.
//! There is no process-wide default address.

use std::time::Duration;

use url::Url;

/// How long the orchestrator waits for a submission to become durable.
///
/// Confirmation polls run with exponential backoff: the first poll is
/// immediate, then delays double from `poll_interval` up to a 5-second
/// cap, for at most `max_attempts` polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalityPolicy {
    /// Maximum confirmation polls before giving up.
    pub max_attempts: u32,
    /// Initial delay between polls.
    pub poll_interval: Duration,
}

impl Default for FinalityPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            poll_interval: Duration::from_millis(200),
        }
    }
}

/// Configuration for a [`MembershipClient`](crate::MembershipClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Network address of the admission program deployment.
    pub program_address: Url,
    /// Network address of the service directory.
    pub directory_address: Url,
    /// Timeout applied to each off-chain suspension point (directory
    /// resolution, eligibility query, proof generation).
    pub step_timeout: Duration,
    /// Finality-wait policy for step 7.
    pub finality: FinalityPolicy,
}

impl ClientConfig {
    /// Create a configuration with default timeouts.
    pub fn new(program_address: Url, directory_address: Url) -> Self {
        Self {
            program_address,
            directory_address,
            step_timeout: Duration::from_secs(10),
            finality: FinalityPolicy::default(),
        }
    }

    /// Override the per-step timeout.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Override the finality-wait policy.
    pub fn with_finality(mut self, finality: FinalityPolicy) -> Self {
        self.finality = finality;
        self
    }
}
