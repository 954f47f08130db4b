//! # Shared Types Crate
//!
//! Domain types used across every Ethmission client crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, amounts and hashes are defined
//!   here and nowhere else.
//! - **Parse, don't validate**: an [`Address`] value is always 20 valid bytes;
//!   hex casing is normalized at the parse boundary, so equality is already
//!   case-insensitive.

pub mod address;
pub mod amount;
pub mod store;

pub use address::{Address, AddressError};
pub use amount::{format_tickets, whole_tickets, ONE_TICKET_WEI};
pub use store::{KeyValueStore, MemoryStore, StoreError};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// Hash of a broadcast transaction.
pub type TxHash = Hash;
