//! # Outbound Port: External Wallet
//!
//! Boundary to a user-controlled signing agent (browser extension or similar)
//! that holds keys outside this process.

use async_trait::async_trait;
use ethmission_types::Address;

use crate::errors::KeystoreError;

/// A user-held wallet agent that manages accounts and prompts per action.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait ExternalWallet: Send + Sync {
    /// Request account access. The agent prompts the user; refusal surfaces
    /// as [`KeystoreError::ConnectionRejected`].
    async fn request_accounts(&self) -> Result<Vec<Address>, KeystoreError>;
}
