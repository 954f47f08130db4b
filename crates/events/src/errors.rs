//! Error types for event creation and entry.

use ethmission_dispatch::DispatchError;
use ethmission_roles::RoleError;
use ethmission_types::{AddressError, StoreError};
use thiserror::Error;

/// Errors surfaced by [`crate::EventLedger`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    /// Capacity must be at least one.
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u32),

    /// A doorman or venue address did not parse.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Registering the event's doorman or venue role failed; the event was
    /// not persisted.
    #[error("Role registration failed: {0}")]
    RoleRegistrationFailure(#[from] RoleError),

    /// No event with this id.
    #[error("Unknown event: {0}")]
    NotFound(u64),

    /// The event is already at its attendance cap.
    #[error("Event {id} is at capacity ({capacity})")]
    AtCapacity { id: u64, capacity: u32 },

    /// The attendee holds less than one whole ticket.
    #[error("Insufficient ticket balance for entry")]
    InsufficientTicketBalance,

    /// The entry burn did not confirm; attendance was not changed.
    #[error("Entry burn failed: {0}")]
    BurnTransactionFailed(#[from] DispatchError),

    /// The ledger could not be loaded or persisted.
    #[error("Event storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for EventError {
    fn from(e: StoreError) -> Self {
        EventError::Storage(e.0)
    }
}
