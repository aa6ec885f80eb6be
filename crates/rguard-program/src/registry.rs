//! # Region and Nullifier Registries
//!
//! The two leaf data structures owned by the admission program.
//!
//! [`RegionRegistry`] maps region identifiers to capacity and occupancy.
//! Unknown regions report capacity 0 and occupancy 0, so a region admits
//! nobody until an administrator sets its capacity. Occupancy only moves
//! forward; capacity may be set in either direction, including below the
//! current occupancy — existing admissions are never truncated, the region
//! simply reports no vacancy until capacity is raised again.
//!
//! [`NullifierRegistry`] is the set of consumed one-time credentials.
//! Entries are permanent: a nullifier is consumed at most once, globally,
//! across all regions, and never deleted.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use rguard_core::Hash32;

/// Per-region admission bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Region {
    capacity: u64,
    occupancy: u64,
}

/// Mapping from region identifier to capacity and occupancy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionRegistry {
    regions: HashMap<Hash32, Region>,
}

impl RegionRegistry {
    /// Create an empty registry. All regions start unknown: capacity 0,
    /// occupancy 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The capacity of a region. 0 for unknown regions.
    pub fn capacity(&self, region_id: &Hash32) -> u64 {
        self.regions.get(region_id).map_or(0, |r| r.capacity)
    }

    /// The occupancy of a region. 0 for unknown regions.
    pub fn occupancy(&self, region_id: &Hash32) -> u64 {
        self.regions.get(region_id).map_or(0, |r| r.occupancy)
    }

    /// Replace a region's capacity.
    ///
    /// No floor relative to current occupancy: setting capacity below
    /// occupancy is permitted and renders the region full for new
    /// admissions without truncating existing ones.
    pub fn set_capacity(&mut self, region_id: Hash32, new_capacity: u64) {
        self.regions.entry(region_id).or_default().capacity = new_capacity;
    }

    /// Whether the region can accept one more admission.
    pub fn has_vacancy(&self, region_id: &Hash32) -> bool {
        self.occupancy(region_id) < self.capacity(region_id)
    }

    /// Record one admission, consuming one unit of vacancy.
    ///
    /// Returns `false` without mutating when the region has no vacancy.
    pub fn admit_one(&mut self, region_id: Hash32) -> bool {
        if !self.has_vacancy(&region_id) {
            return false;
        }
        // has_vacancy implies the entry exists (capacity > 0 was set).
        let region = self.regions.entry(region_id).or_default();
        region.occupancy += 1;
        true
    }
}

/// The set of consumed one-time membership credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NullifierRegistry {
    consumed: HashSet<Hash32>,
}

impl NullifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a nullifier has already been consumed.
    pub fn is_consumed(&self, nullifier: &Hash32) -> bool {
        self.consumed.contains(nullifier)
    }

    /// Consume a nullifier. Returns `false` if it was already consumed.
    pub fn consume(&mut self, nullifier: Hash32) -> bool {
        self.consumed.insert(nullifier)
    }

    /// Number of consumed nullifiers.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Whether no nullifier has been consumed yet.
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
