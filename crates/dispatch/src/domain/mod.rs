//! Pure transaction-building logic: ABI encoding, legacy transaction
//! assembly and the gas policy. No I/O.

pub mod abi;
pub mod call;
pub mod gas;
pub mod tx;
