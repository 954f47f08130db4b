//! Error types for balance reads and ticket commerce.

use ethmission_dispatch::{AbiError, DispatchError, ProviderError};
use ethmission_types::U256;
use thiserror::Error;

/// Errors surfaced by [`crate::BalanceService`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BalanceError {
    /// A read-only chain call failed.
    #[error("Balance read failed: {0}")]
    Read(String),

    /// The contract returned data the client could not decode.
    #[error("Malformed contract response: {0}")]
    Decode(#[from] AbiError),

    /// A commerce transaction failed in dispatch.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The session holds fewer tickets than the operation moves.
    #[error("Insufficient tickets: have {have}, need {need}")]
    InsufficientTickets { have: U256, need: U256 },
}

impl From<ProviderError> for BalanceError {
    fn from(e: ProviderError) -> Self {
        BalanceError::Read(e.0)
    }
}
