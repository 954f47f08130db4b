//! # Outbound Ports
//!
//! `Provider` is the raw chain boundary: broadcast, read-only calls and
//! account queries. `ExternalSigner` is the prompt-and-broadcast boundary for
//! wallets that hold the key on the user's side; the signer owns the whole
//! sign-and-submit exchange and reports only the outcome.

use async_trait::async_trait;
use ethmission_types::{Address, U256};

use crate::domain::tx::{PendingTransaction, Receipt};
use crate::errors::{DispatchError, ProviderError};

/// Remote chain access.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Broadcast a raw signed transaction and wait for its receipt.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Receipt, ProviderError>;

    /// Execute a read-only contract call and return the raw return data.
    async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Native balance of an account.
    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError>;

    /// Confirmed transaction count of an account, used as the next nonce.
    async fn transaction_count(&self, address: Address) -> Result<u64, ProviderError>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> Result<U256, ProviderError>;
}

/// A wallet that signs on the user's side and submits on our behalf.
///
/// The user can decline at the wallet's prompt; implementations map that
/// refusal to [`DispatchError::RejectedByUser`].
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Prompt the user, sign, broadcast and wait for the receipt.
    async fn send_transaction(&self, tx: &PendingTransaction) -> Result<Receipt, DispatchError>;
}
