//! # Role Assignments
//!
//! Four role kinds cover the whole access model: everyone starts as an
//! attendee, doormen admit at the door, venue managers receive entry burns,
//! and the admin manages assignments and events.

use std::fmt;

use ethmission_types::Address;
use serde::{Deserialize, Serialize};

/// Access level a wallet can act under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    /// Default role, no privileges.
    Attendee,
    /// Admits attendees at event entry.
    Doorman,
    /// Receives entry-burn transfers; owns the venue view.
    Venue,
    /// Registers roles and creates events.
    Admin,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleKind::Attendee => "attendee",
            RoleKind::Doorman => "doorman",
            RoleKind::Venue => "venue",
            RoleKind::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// A named, insert-only binding of an address to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Role granted to the address.
    pub kind: RoleKind,
    /// Display name, unique across the registry.
    pub name: String,
    /// Wallet address, unique across the registry.
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&RoleKind::Doorman).unwrap();
        assert_eq!(json, "\"doorman\"");
    }

    #[test]
    fn test_assignment_json_roundtrip() {
        let assignment = RoleAssignment {
            kind: RoleKind::Venue,
            name: "Main Hall".to_string(),
            address: Address::from_bytes([0x42; 20]),
        };
        let json = serde_json::to_string(&assignment).unwrap();
        let back: RoleAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, assignment);
    }
}
