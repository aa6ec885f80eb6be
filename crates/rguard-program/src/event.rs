//! # Admission Events
//!
//! The auditable record appended on every successful admission. External
//! auditors and indexers consume the event log; the program itself never
//! reads it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rguard_core::{Address, Hash32};

/// Emitted when an identity is admitted to a region.
///
/// Sequence numbers are assigned in ledger order, starting at 0, and are
/// gap-free: the event with sequence `n` is the `n+1`-th admission the
/// program ever granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionGranted {
    /// The admitted identity.
    pub identity: Address,
    /// The region the identity was admitted to.
    pub region_id: Hash32,
    /// Position of this admission in the program's total order.
    pub sequence: u64,
    /// Wall-clock time at which the admission was applied.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let event = AdmissionGranted {
            identity: Address::from_public_key_bytes(b"event-key"),
            region_id: Hash32::digest(b"NG"),
            sequence: 7,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: AdmissionGranted = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
