//! # Ledger Connection
//!
//! [`AdmissionLedger`] is the orchestrator's seam to the host ledger: it
//! submits admission requests into the ledger's total order and answers
//! confirmation and read-only queries. Production backends speak to a real
//! network; [`InProcessLedger`] hosts the admission program directly and
//! models the properties the orchestrator depends on — serialized
//! execution and finality after a confirmation depth.
//!
//! ## Ordering
//!
//! The in-process ledger serializes every mutating operation behind one
//! mutex. Whichever submission acquires the lock first is ordered first;
//! wall-clock arrival at the caller plays no role, matching the host
//! ledger model the program is written against.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rguard_core::{Address, Hash32};
use rguard_program::{AdmissionError, AdmissionProgram, ProofVerifier};

/// A unique identifier for an ordered submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Create a new random submission identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confirmation state of an ordered submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Included but not yet durable.
    Pending {
        /// Confirmations accumulated so far.
        confirmations: u32,
    },
    /// Durable — no longer subject to reordering or rollback.
    Finalized {
        /// The submission's position in the ledger's total order.
        sequence: u64,
    },
}

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The admission program rejected the submission. Program state is
    /// unchanged; retrying the same inputs fails identically.
    #[error("admission rejected: {0}")]
    Rejected(#[from] AdmissionError),
    /// Network or ledger-layer failure. The submission's fate is unknown
    /// to the caller — it may or may not have been ordered.
    #[error("transport failure: {0}")]
    Transport(String),
    /// No submission with this identifier is known to the ledger.
    #[error("unknown submission: {0}")]
    UnknownSubmission(SubmissionId),
}

/// The orchestrator's connection to the host ledger.
pub trait AdmissionLedger {
    /// Submit an admission request into the ledger's total order.
    ///
    /// Returns once the request has been ordered and applied. Program
    /// rejections surface as [`LedgerError::Rejected`].
    fn submit_admission(
        &self,
        caller: Address,
        region_id: Hash32,
        nullifier: Hash32,
        proof: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<SubmissionId, LedgerError>> + Send;

    /// Confirmation state of a previously ordered submission.
    fn confirmation_status(
        &self,
        submission: &SubmissionId,
    ) -> impl std::future::Future<Output = Result<ConfirmationStatus, LedgerError>> + Send;

    /// Whether an identity holds membership.
    fn has_access(
        &self,
        identity: &Address,
    ) -> impl std::future::Future<Output = Result<bool, LedgerError>> + Send;

    /// Current occupancy of a region.
    fn occupancy(
        &self,
        region_id: &Hash32,
    ) -> impl std::future::Future<Output = Result<u64, LedgerError>> + Send;

    /// Current capacity of a region.
    fn capacity(
        &self,
        region_id: &Hash32,
    ) -> impl std::future::Future<Output = Result<u64, LedgerError>> + Send;
}

#[derive(Debug)]
struct SubmissionRecord {
    sequence: u64,
    polls: u32,
}

/// An in-process ledger hosting the admission program directly.
///
/// Submissions are ordered by lock acquisition and finalize after
/// `confirmation_depth` status polls — enough to exercise the
/// orchestrator's finality wait without a network.
#[derive(Debug)]
pub struct InProcessLedger<V> {
    program: Arc<Mutex<AdmissionProgram<V>>>,
    submissions: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
    confirmation_depth: u32,
}

impl<V> Clone for InProcessLedger<V> {
    fn clone(&self) -> Self {
        Self {
            program: Arc::clone(&self.program),
            submissions: Arc::clone(&self.submissions),
            confirmation_depth: self.confirmation_depth,
        }
    }
}

impl<V: ProofVerifier> InProcessLedger<V> {
    /// Host a program instance, finalizing submissions after
    /// `confirmation_depth` confirmation polls.
    pub fn new(program: AdmissionProgram<V>, confirmation_depth: u32) -> Self {
        Self::from_shared(Arc::new(Mutex::new(program)), confirmation_depth)
    }

    /// Host an already shared program instance. Multiple ledger handles
    /// over the same program model concurrent clients of one deployment.
    pub fn from_shared(
        program: Arc<Mutex<AdmissionProgram<V>>>,
        confirmation_depth: u32,
    ) -> Self {
        Self {
            program,
            submissions: Arc::new(Mutex::new(HashMap::new())),
            confirmation_depth,
        }
    }

    /// Shared handle to the hosted program, for administration and test
    /// assertions.
    pub fn program(&self) -> Arc<Mutex<AdmissionProgram<V>>> {
        Arc::clone(&self.program)
    }
}

impl<V: ProofVerifier + Send> AdmissionLedger for InProcessLedger<V> {
    async fn submit_admission(
        &self,
        caller: Address,
        region_id: Hash32,
        nullifier: Hash32,
        proof: Vec<u8>,
    ) -> Result<SubmissionId, LedgerError> {
        // The lock IS the ledger's total order: the operation applies
        // indivisibly, and competing submissions serialize here.
        let event = self
            .program
            .lock()
            .request_admission(caller, region_id, nullifier, &proof)?;

        let id = SubmissionId::new();
        self.submissions.lock().insert(
            id,
            SubmissionRecord {
                sequence: event.sequence,
                polls: 0,
            },
        );
        Ok(id)
    }

    async fn confirmation_status(
        &self,
        submission: &SubmissionId,
    ) -> Result<ConfirmationStatus, LedgerError> {
        let mut submissions = self.submissions.lock();
        let record = submissions
            .get_mut(submission)
            .ok_or(LedgerError::UnknownSubmission(*submission))?;
        record.polls += 1;
        if record.polls >= self.confirmation_depth {
            Ok(ConfirmationStatus::Finalized {
                sequence: record.sequence,
            })
        } else {
            Ok(ConfirmationStatus::Pending {
                confirmations: record.polls,
            })
        }
    }

    async fn has_access(&self, identity: &Address) -> Result<bool, LedgerError> {
        Ok(self.program.lock().has_access(identity))
    }

    async fn occupancy(&self, region_id: &Hash32) -> Result<u64, LedgerError> {
        Ok(self.program.lock().occupancy(region_id))
    }

    async fn capacity(&self, region_id: &Hash32) -> Result<u64, LedgerError> {
        Ok(self.program.lock().capacity(region_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rguard_core::{membership_nullifier, proof_transcript_digest, ProofContext, RegionCode};
    use rguard_program::DigestProofVerifier;

    fn admin() -> Address {
        Address::from_public_key_bytes(b"ledger-admin")
    }

    fn ledger(depth: u32) -> InProcessLedger<DigestProofVerifier> {
        InProcessLedger::new(AdmissionProgram::new(DigestProofVerifier, admin()), depth)
    }

    fn credentials(caller: Address, region_id: Hash32) -> (Hash32, Vec<u8>) {
        let nullifier = membership_nullifier(&caller);
        let context = ProofContext {
            identity: caller,
            region_id,
            nullifier,
        };
        (
            nullifier,
            proof_transcript_digest(&context).as_bytes().to_vec(),
        )
    }

    #[tokio::test]
    async fn submit_orders_and_applies() {
        let ledger = ledger(1);
        let ng = RegionCode::new("NG").unwrap().region_id();
        ledger.program().lock().set_capacity(admin(), ng, 1).unwrap();

        let caller = Address::from_public_key_bytes(b"ledger-caller");
        let (nullifier, proof) = credentials(caller, ng);
        ledger
            .submit_admission(caller, ng, nullifier, proof)
            .await
            .unwrap();

        assert!(ledger.has_access(&caller).await.unwrap());
        assert_eq!(ledger.occupancy(&ng).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rejection_surfaces_and_leaves_state() {
        let ledger = ledger(1);
        let ng = RegionCode::new("NG").unwrap().region_id();
        // Capacity left at the default 0.
        let caller = Address::from_public_key_bytes(b"rejected-caller");
        let (nullifier, proof) = credentials(caller, ng);
        let result = ledger.submit_admission(caller, ng, nullifier, proof).await;
        assert!(matches!(
            result,
            Err(LedgerError::Rejected(AdmissionError::RegionFull))
        ));
        assert!(!ledger.has_access(&caller).await.unwrap());
    }

    #[tokio::test]
    async fn finality_reached_after_confirmation_depth() {
        let ledger = ledger(3);
        let ng = RegionCode::new("NG").unwrap().region_id();
        ledger.program().lock().set_capacity(admin(), ng, 1).unwrap();

        let caller = Address::from_public_key_bytes(b"finality-caller");
        let (nullifier, proof) = credentials(caller, ng);
        let id = ledger
            .submit_admission(caller, ng, nullifier, proof)
            .await
            .unwrap();

        assert!(matches!(
            ledger.confirmation_status(&id).await.unwrap(),
            ConfirmationStatus::Pending { confirmations: 1 }
        ));
        assert!(matches!(
            ledger.confirmation_status(&id).await.unwrap(),
            ConfirmationStatus::Pending { confirmations: 2 }
        ));
        assert!(matches!(
            ledger.confirmation_status(&id).await.unwrap(),
            ConfirmationStatus::Finalized { sequence: 0 }
        ));
    }

    #[tokio::test]
    async fn unknown_submission_is_an_error() {
        let ledger = ledger(1);
        let bogus = SubmissionId::new();
        assert!(matches!(
            ledger.confirmation_status(&bogus).await,
            Err(LedgerError::UnknownSubmission(_))
        ));
    }

    #[tokio::test]
    async fn shared_program_is_visible_across_handles() {
        let first = ledger(1);
        let second = InProcessLedger::from_shared(first.program(), 1);
        let ng = RegionCode::new("NG").unwrap().region_id();
        first.program().lock().set_capacity(admin(), ng, 5).unwrap();
        assert_eq!(second.capacity(&ng).await.unwrap(), 5);
    }
}
