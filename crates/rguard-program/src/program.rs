//! # The Admission Program
//!
//! Combines the region and nullifier registries with role-gated
//! administration and event emission. One instance of this struct is the
//! complete on-ledger state of the system.
//!
//! ## Check Order
//!
//! `request_admission` applies its rejections in a fixed order: proof
//! validity, nullifier freshness, membership, capacity. The order is
//! observable (a caller with both a spent nullifier and an existing
//! membership sees `DuplicateCredential`), so it is part of the interface
//! and covered by tests.

use std::collections::HashSet;

use chrono::Utc;

use rguard_core::{Address, Hash32, ProofContext};

use crate::error::AdmissionError;
use crate::event::AdmissionGranted;
use crate::registry::{NullifierRegistry, RegionRegistry};
use crate::verifier::ProofVerifier;

/// The ledger-resident admission state machine.
///
/// All mutating operations take `&mut self`: the host ledger applies them
/// serially in its total order, and each call either commits completely or
/// rejects with no state change.
#[derive(Debug)]
pub struct AdmissionProgram<V> {
    verifier: V,
    admins: HashSet<Address>,
    regions: RegionRegistry,
    nullifiers: NullifierRegistry,
    members: HashSet<Address>,
    events: Vec<AdmissionGranted>,
}

impl<V: ProofVerifier> AdmissionProgram<V> {
    /// Deploy a program instance with a single genesis admin.
    pub fn new(verifier: V, genesis_admin: Address) -> Self {
        Self {
            verifier,
            admins: HashSet::from([genesis_admin]),
            regions: RegionRegistry::new(),
            nullifiers: NullifierRegistry::new(),
            members: HashSet::new(),
            events: Vec::new(),
        }
    }

    /// Whether an identity holds the admin role.
    pub fn is_admin(&self, who: &Address) -> bool {
        self.admins.contains(who)
    }

    /// Grant the admin role to another identity. Admin-only.
    ///
    /// # Errors
    ///
    /// [`AdmissionError::Unauthorized`] if `caller` is not an admin; the
    /// role set is unchanged.
    pub fn grant_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), AdmissionError> {
        if !self.admins.contains(&caller) {
            return Err(AdmissionError::Unauthorized);
        }
        self.admins.insert(new_admin);
        Ok(())
    }

    /// Replace a region's capacity. Admin-only.
    ///
    /// No floor relative to current occupancy: an admin may set capacity
    /// below occupancy, which closes the region to new admissions without
    /// truncating existing ones.
    ///
    /// # Errors
    ///
    /// [`AdmissionError::Unauthorized`] if `caller` is not an admin; the
    /// capacity value is unchanged.
    pub fn set_capacity(
        &mut self,
        caller: Address,
        region_id: Hash32,
        new_capacity: u64,
    ) -> Result<(), AdmissionError> {
        if !self.admins.contains(&caller) {
            return Err(AdmissionError::Unauthorized);
        }
        self.regions.set_capacity(region_id, new_capacity);
        tracing::debug!(%region_id, new_capacity, "region capacity set");
        Ok(())
    }

    /// Request admission of `caller` to a region.
    ///
    /// On success the nullifier is consumed, the caller's access record is
    /// set, the region's occupancy increments by one, and an
    /// [`AdmissionGranted`] event is appended — as one atomic unit. Any
    /// rejection leaves all state untouched.
    ///
    /// # Errors
    ///
    /// In check order: [`AdmissionError::InvalidProof`],
    /// [`AdmissionError::DuplicateCredential`],
    /// [`AdmissionError::AlreadyMember`], [`AdmissionError::RegionFull`].
    pub fn request_admission(
        &mut self,
        caller: Address,
        region_id: Hash32,
        nullifier: Hash32,
        proof: &[u8],
    ) -> Result<AdmissionGranted, AdmissionError> {
        let context = ProofContext {
            identity: caller,
            region_id,
            nullifier,
        };
        if !self.verifier.verify(&context, proof) {
            return Err(AdmissionError::InvalidProof);
        }
        if self.nullifiers.is_consumed(&nullifier) {
            return Err(AdmissionError::DuplicateCredential);
        }
        if self.members.contains(&caller) {
            return Err(AdmissionError::AlreadyMember);
        }
        if !self.regions.admit_one(region_id) {
            return Err(AdmissionError::RegionFull);
        }

        // Commit point: every check has passed and occupancy is already
        // incremented; the remaining mutations cannot fail.
        self.nullifiers.consume(nullifier);
        self.members.insert(caller);

        let event = AdmissionGranted {
            identity: caller,
            region_id,
            sequence: self.events.len() as u64,
            timestamp: Utc::now(),
        };
        self.events.push(event.clone());
        tracing::info!(
            identity = %event.identity,
            region_id = %event.region_id,
            sequence = event.sequence,
            "admission granted"
        );
        Ok(event)
    }

    /// Whether an identity holds membership. `false` for unknown identities.
    pub fn has_access(&self, identity: &Address) -> bool {
        self.members.contains(identity)
    }

    /// Current occupancy of a region. 0 for unknown regions.
    pub fn occupancy(&self, region_id: &Hash32) -> u64 {
        self.regions.occupancy(region_id)
    }

    /// Current capacity of a region. 0 for unknown regions.
    pub fn capacity(&self, region_id: &Hash32) -> u64 {
        self.regions.capacity(region_id)
    }

    /// The admission event log, in ledger order.
    pub fn events(&self) -> &[AdmissionGranted] {
        &self.events
    }
}
