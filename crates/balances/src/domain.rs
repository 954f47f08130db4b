//! # Balance Views
//!
//! Read-model rows the facade projects for callers.

use ethmission_roles::RoleKind;
use ethmission_types::{Address, U256};
use serde::Serialize;

/// A pair of independently read balances for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balances {
    /// Token balance in wei-denominated ticket units.
    pub ticket: U256,
    /// Native chain balance in wei.
    pub native: U256,
}

/// One entry of the contract's holder enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderBalance {
    pub address: Address,
    /// Ticket balance in wei-denominated units.
    pub amount: U256,
}

/// A holder joined with their registry and ledger footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueStatsRow {
    pub address: Address,
    /// Registered display name, when the holder has a role.
    pub name: Option<String>,
    /// Registered role, when the holder has one.
    pub role: Option<RoleKind>,
    /// Ticket balance in wei-denominated units.
    pub tickets: U256,
    /// Events where this address is doorman or venue manager.
    pub organized: u32,
    /// Events this address has entered.
    pub attended: u32,
}
