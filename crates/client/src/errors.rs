//! Error types for the client runtime.

use ethmission_balances::BalanceError;
use ethmission_dispatch::DispatchError;
use ethmission_events::EventError;
use ethmission_keystore::KeystoreError;
use ethmission_roles::RoleError;
use thiserror::Error;

/// Errors surfaced by the client runtime.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration file was missing or malformed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the local store failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No wallet session is connected.
    #[error("No wallet connected")]
    NotConnected,

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Balance(#[from] BalanceError),
}
