//! # The Join-Region Workflow
//!
//! [`MembershipClient`] sequences the admission protocol for a single
//! identity:
//!
//! 1. bind the signing identity from the credential source;
//! 2. resolve the eligibility oracle's address through the service
//!    directory (cached for the client's lifetime);
//! 3. query eligibility — re-asked on every call, never cached;
//! 4. derive the region identifier and membership nullifier (pure);
//! 5. produce the eligibility proof;
//! 6. submit to the admission program;
//! 7. wait for the submission to become durable.
//!
//! Steps 2, 3 and 5 run under the configured per-step timeout; a timeout
//! leaves no ledger state changed because nothing was submitted. Re-entry
//! by an already admitted identity resolves to a successful receipt with
//! [`AdmissionOutcome::AlreadyAdmitted`] — the program's rejection is the
//! idempotence mechanism, not an error to surface.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use rguard_core::{membership_nullifier, Address, Hash32, ProofContext, RegionCode};
use rguard_program::AdmissionError;

use crate::config::ClientConfig;
use crate::directory::ServiceDirectory;
use crate::error::{JoinError, WorkflowStep};
use crate::ledger::{AdmissionLedger, ConfirmationStatus, LedgerError, SubmissionId};
use crate::oracle::EligibilityOracle;
use crate::proof::ProofProducer;
use crate::signer::CredentialSource;

/// Directory name under which the eligibility oracle registers.
pub const ORACLE_SERVICE: &str = "permission";

/// Upper bound on the delay between confirmation polls.
const MAX_POLL_DELAY: Duration = Duration::from_secs(5);

/// How a successful join concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionOutcome {
    /// A new admission was ordered and finalized.
    Admitted {
        /// The ordered submission.
        submission: SubmissionId,
        /// The admission's position in the program's event order.
        sequence: u64,
    },
    /// The identity already held membership; no state changed.
    AlreadyAdmitted,
}

/// The durable result of a join-region workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionReceipt {
    /// The identity the workflow acted for.
    pub identity: Address,
    /// The region the workflow targeted.
    pub region_id: Hash32,
    /// How the workflow concluded.
    pub outcome: AdmissionOutcome,
}

/// Run a fallible suspension point under the per-step timeout.
async fn with_timeout<T, E, F>(limit: Duration, step: WorkflowStep, fut: F) -> Result<T, JoinError>
where
    F: Future<Output = Result<T, E>>,
    JoinError: From<E>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(JoinError::from),
        Err(_) => Err(JoinError::Timeout { step }),
    }
}

/// The admission orchestrator for a single identity.
///
/// Holds no persistent state beyond the bound identity, the cached oracle
/// endpoint, and the in-flight workflow. Multiple clients may run
/// concurrently against the same ledger without coordination — correctness
/// rests entirely on the admission program's atomicity.
#[derive(Debug)]
pub struct MembershipClient<D, O, P, L> {
    config: ClientConfig,
    credentials: CredentialSource,
    directory: D,
    oracle: O,
    prover: P,
    ledger: L,
    identity: Option<Address>,
    oracle_endpoint: Option<Url>,
}

impl<D, O, P, L> MembershipClient<D, O, P, L>
where
    D: ServiceDirectory,
    O: EligibilityOracle,
    P: ProofProducer,
    L: AdmissionLedger,
{
    /// Create a client. All collaborators and addresses are explicit —
    /// there is no ambient default deployment.
    pub fn new(
        config: ClientConfig,
        credentials: CredentialSource,
        directory: D,
        oracle: O,
        prover: P,
        ledger: L,
    ) -> Self {
        Self {
            config,
            credentials,
            directory,
            oracle,
            prover,
            ledger,
            identity: None,
            oracle_endpoint: None,
        }
    }

    /// Bind and return the caller's signing identity.
    ///
    /// Resolution happens once; subsequent calls return the bound address.
    ///
    /// # Errors
    ///
    /// [`JoinError::NoSignerAvailable`] if the credential source exposes
    /// no identity.
    pub fn connect_identity(&mut self) -> Result<Address, JoinError> {
        if let Some(identity) = self.identity {
            return Ok(identity);
        }
        let identity = self
            .credentials
            .resolve_address()
            .ok_or(JoinError::NoSignerAvailable)?;
        tracing::debug!(%identity, "signing identity bound");
        self.identity = Some(identity);
        Ok(identity)
    }

    /// The oracle endpoint, resolved through the directory on first use
    /// and cached for the client's lifetime. A stale cache is an accepted
    /// risk — the admission program remains the final authority.
    async fn oracle_endpoint(&mut self) -> Result<Url, JoinError> {
        if let Some(endpoint) = &self.oracle_endpoint {
            return Ok(endpoint.clone());
        }
        let endpoint = with_timeout(
            self.config.step_timeout,
            WorkflowStep::ResolveOracle,
            self.directory.resolve(ORACLE_SERVICE),
        )
        .await?;
        tracing::debug!(%endpoint, "eligibility oracle resolved");
        self.oracle_endpoint = Some(endpoint.clone());
        Ok(endpoint)
    }

    /// Whether the bound identity is currently eligible on the network.
    ///
    /// Queried fresh on every call; eligibility can change between calls
    /// and a cached answer would let an ineligible identity pay for a
    /// doomed submission.
    pub async fn check_eligibility(&mut self) -> Result<bool, JoinError> {
        let identity = self.connect_identity()?;
        let endpoint = self.oracle_endpoint().await?;
        let eligible = with_timeout(
            self.config.step_timeout,
            WorkflowStep::CheckEligibility,
            self.oracle.is_eligible(&endpoint, &identity),
        )
        .await?;
        tracing::debug!(%identity, eligible, "eligibility checked");
        Ok(eligible)
    }

    /// Drive the full admission workflow for one region.
    ///
    /// Returns once the state change is durable (or known to predate this
    /// call). Every off-chain rejection happens before any on-ledger cost
    /// is incurred.
    pub async fn join_region(&mut self, region_code: &str) -> Result<AdmissionReceipt, JoinError> {
        let identity = self.connect_identity()?;

        if !self.check_eligibility().await? {
            return Err(JoinError::NotEligible);
        }

        // Pure, offline derivations — no suspension.
        let code = RegionCode::new(region_code)?;
        let region_id = code.region_id();
        let nullifier = membership_nullifier(&identity);
        let context = ProofContext {
            identity,
            region_id,
            nullifier,
        };

        let proof = with_timeout(
            self.config.step_timeout,
            WorkflowStep::ProduceProof,
            self.prover.produce(&context),
        )
        .await?;

        tracing::debug!(%identity, region = %code, "submitting admission request");
        match self
            .ledger
            .submit_admission(identity, region_id, nullifier, proof)
            .await
        {
            Ok(submission) => {
                let sequence = self.await_finality(&submission).await?;
                tracing::info!(%identity, region = %code, %submission, "admission finalized");
                Ok(AdmissionReceipt {
                    identity,
                    region_id,
                    outcome: AdmissionOutcome::Admitted {
                        submission,
                        sequence,
                    },
                })
            }
            Err(LedgerError::Rejected(
                AdmissionError::AlreadyMember | AdmissionError::DuplicateCredential,
            )) => {
                // Idempotent re-entry: the identity is a member, the
                // program's rejection is the replay protection working.
                tracing::info!(%identity, "already admitted; treating re-entry as success");
                Ok(AdmissionReceipt {
                    identity,
                    region_id,
                    outcome: AdmissionOutcome::AlreadyAdmitted,
                })
            }
            Err(LedgerError::Rejected(error)) => Err(JoinError::Rejected(error)),
            Err(error) => {
                // Ambiguous failure: the submission may have been ordered
                // before the transport broke. The membership record is the
                // authority on whether it took effect.
                match self.ledger.has_access(&identity).await {
                    Ok(true) => Ok(AdmissionReceipt {
                        identity,
                        region_id,
                        outcome: AdmissionOutcome::AlreadyAdmitted,
                    }),
                    _ => Err(JoinError::Submission(error.to_string())),
                }
            }
        }
    }

    /// Poll until the submission is durable, with exponential backoff.
    async fn await_finality(&self, submission: &SubmissionId) -> Result<u64, JoinError> {
        let policy = self.config.finality;
        let mut delay = policy.poll_interval;
        for attempt in 1..=policy.max_attempts {
            match self.ledger.confirmation_status(submission).await {
                Ok(ConfirmationStatus::Finalized { sequence }) => return Ok(sequence),
                Ok(ConfirmationStatus::Pending { confirmations }) => {
                    tracing::trace!(%submission, confirmations, attempt, "awaiting finality");
                }
                Err(error) => return Err(JoinError::Submission(error.to_string())),
            }
            if attempt < policy.max_attempts {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_POLL_DELAY);
            }
        }
        Err(JoinError::FinalityExhausted {
            attempts: policy.max_attempts,
        })
    }
}
