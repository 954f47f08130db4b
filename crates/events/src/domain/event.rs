//! # Event Records
//!
//! An event binds a doorman and a venue manager to a dated occasion with a
//! hard attendance cap. Ids are creation-time milliseconds, made unique at
//! creation.

use chrono::NaiveDate;
use ethmission_types::Address;
use serde::{Deserialize, Serialize};

/// A capacity-bounded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Creation-time milliseconds, unique per ledger.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Doorman admitting attendees.
    pub doorman: Address,
    /// Venue manager receiving entry burns.
    pub venue_manager: Address,
    /// Hard attendance cap, at least one.
    pub max_capacity: u32,
    /// Admitted entries so far, never above `max_capacity`.
    pub current_attendance: u32,
}

impl Event {
    /// Whether another entry would exceed the cap.
    pub fn is_full(&self) -> bool {
        self.current_attendance >= self.max_capacity
    }
}

/// Everything needed to create an event, before validation.
///
/// Addresses arrive as strings from the outside and are parsed during
/// creation; role names are what the doorman and venue appear as in the
/// registry.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub name: String,
    pub date: NaiveDate,
    pub doorman_name: String,
    pub doorman_address: String,
    pub venue_name: String,
    pub venue_address: String,
    pub max_capacity: u32,
}
