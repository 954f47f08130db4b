//! Error types for role registration and persistence.

use ethmission_types::{Address, AddressError, StoreError};
use thiserror::Error;

/// Errors surfaced by [`crate::RoleRegistry`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    /// The supplied address did not parse; checked before any uniqueness test.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// An assignment with this name already exists.
    #[error("Role name already registered: {0}")]
    DuplicateName(String),

    /// An assignment with this address already exists.
    #[error("Address already registered: {0}")]
    DuplicateAddress(Address),

    /// The registry could not be loaded or persisted.
    #[error("Role storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for RoleError {
    fn from(e: StoreError) -> Self {
        RoleError::Storage(e.0)
    }
}
