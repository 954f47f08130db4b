//! Error types for transaction dispatch and contract data handling.

use thiserror::Error;

/// Errors surfaced by [`crate::Dispatcher::dispatch`].
///
/// Both signing backends converge on this taxonomy; callers never branch on
/// which backend produced the failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The user declined the transaction at the external signer's prompt.
    #[error("Transaction rejected by the user")]
    RejectedByUser,

    /// Producing a signature failed (local backend).
    #[error("Failed to sign transaction: {0}")]
    SignFailure(String),

    /// The transaction never reached the remote ledger.
    #[error("Failed to broadcast transaction: {0}")]
    BroadcastFailure(String),

    /// The transaction was mined but the contract reverted it.
    #[error("Contract reverted: {0}")]
    ContractRevert(String),
}

/// Transport-level failure from the provider boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Provider error: {0}")]
pub struct ProviderError(pub String);

impl From<ProviderError> for DispatchError {
    fn from(e: ProviderError) -> Self {
        DispatchError::BroadcastFailure(e.0)
    }
}

/// Errors decoding ABI-encoded contract return data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Return data ended before the expected word.
    #[error("ABI data truncated at offset {0}")]
    Truncated(usize),

    /// A value did not fit its declared type.
    #[error("Malformed ABI value: {0}")]
    Malformed(String),
}
