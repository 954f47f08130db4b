//! # Balances and Commerce
//!
//! Read-side facade over the token contract (per-address balances, full
//! holder enumeration, the venue stats join) plus the three commerce
//! operations: buy, transfer and refund.
//!
//! Reads are independent; a ticket balance and a native balance fetched
//! together are two separate calls with no snapshot guarantee. Holder
//! enumeration is linear and unpaginated, as the contract exposes it.

pub mod domain;

mod errors;
mod service;

pub use domain::{Balances, HolderBalance, VenueStatsRow};
pub use errors::BalanceError;
pub use service::{BalanceService, TicketGate};
