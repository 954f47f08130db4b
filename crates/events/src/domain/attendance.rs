//! # Attendance Book
//!
//! Which events an address has entered. The append is idempotent per
//! (attendee, event); repeat entries burn another ticket but do not grow the
//! record.

use std::collections::{BTreeMap, BTreeSet};

use ethmission_types::Address;
use serde::{Deserialize, Serialize};

/// Attendee address to the set of event ids they have entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceBook {
    records: BTreeMap<Address, BTreeSet<u64>>,
}

impl AttendanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `attendee` entered `event_id`. Returns `false` when the
    /// pair was already recorded.
    pub fn record(&mut self, attendee: Address, event_id: u64) -> bool {
        self.records.entry(attendee).or_default().insert(event_id)
    }

    /// Event ids `attendee` has entered, ascending.
    pub fn events_for(&self, attendee: Address) -> Vec<u64> {
        self.records
            .get(&attendee)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }
}
