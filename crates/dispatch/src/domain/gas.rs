//! # Gas Policy
//!
//! Gas limits are fixed per call family, not negotiated per call. Plain token
//! movement fits comfortably in the transfer limit; the entry burn pays for
//! the extra bookkeeping the contract does on that path.

/// Gas limit for plain transfers, purchases and refunds.
pub const GAS_LIMIT_TRANSFER: u64 = 200_000;

/// Gas limit for event-entry burn transfers.
pub const GAS_LIMIT_ENTRY: u64 = 300_000;
