//! # Dispatch Service
//!
//! The [`Dispatcher`] turns a [`ContractCall`] into a submitted transaction
//! through whichever [`SignAndBroadcast`] backend the session connected with.
//! The external backend hands the whole exchange to the user's wallet; the
//! local backend assembles, signs and broadcasts the transaction itself.

use std::sync::Arc;

use async_trait::async_trait;
use ethmission_keystore::LocalSigner;
use ethmission_types::{Address, U256};
use tracing::{debug, info, warn};

use crate::domain::call::ContractCall;
use crate::domain::tx::{LegacyTransaction, PendingTransaction, Receipt};
use crate::errors::DispatchError;
use crate::ports::{ExternalSigner, Provider};

// ============================================================
// Call options
// ============================================================

/// Per-call overrides applied on top of the call family's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Native value carried with the call. Zero for non-payable calls.
    pub value: U256,
    /// Gas limit override; the call family's fixed limit when `None`.
    pub gas_limit: Option<u64>,
}

impl CallOptions {
    /// Options for a non-payable call with family-default gas.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Options carrying `value` wei, for payable calls.
    pub fn with_value(value: U256) -> Self {
        Self { value, gas_limit: None }
    }
}

// ============================================================
// Signing backends
// ============================================================

/// A signing path that can carry a pending transaction to the chain.
#[async_trait]
pub trait SignAndBroadcast: Send + Sync {
    /// The account every dispatched transaction is sent from.
    fn sender(&self) -> Address;

    /// Sign and submit, resolving once the transaction is mined.
    async fn send(&self, tx: PendingTransaction) -> Result<Receipt, DispatchError>;
}

/// Backend delegating signature and submission to the user's wallet.
pub struct ExternalBackend {
    signer: Arc<dyn ExternalSigner>,
    account: Address,
}

impl ExternalBackend {
    pub fn new(signer: Arc<dyn ExternalSigner>, account: Address) -> Self {
        Self { signer, account }
    }
}

#[async_trait]
impl SignAndBroadcast for ExternalBackend {
    fn sender(&self) -> Address {
        self.account
    }

    async fn send(&self, tx: PendingTransaction) -> Result<Receipt, DispatchError> {
        self.signer.send_transaction(&tx).await
    }
}

/// Backend signing with an in-process key unlocked from an encrypted key file.
///
/// Nonce and gas price are fetched fresh per transaction; the signed form is
/// broadcast raw.
pub struct LocalBackend {
    signer: Arc<LocalSigner>,
    provider: Arc<dyn Provider>,
    chain_id: u64,
}

impl LocalBackend {
    pub fn new(signer: Arc<LocalSigner>, provider: Arc<dyn Provider>, chain_id: u64) -> Self {
        Self { signer, provider, chain_id }
    }
}

#[async_trait]
impl SignAndBroadcast for LocalBackend {
    fn sender(&self) -> Address {
        self.signer.address()
    }

    async fn send(&self, tx: PendingTransaction) -> Result<Receipt, DispatchError> {
        let nonce = self.provider.transaction_count(tx.from).await?;
        let gas_price = self.provider.gas_price().await?;

        let unsigned = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit: tx.gas_limit,
            to: tx.to,
            value: tx.value,
            data: tx.data,
            chain_id: self.chain_id,
        };
        let prehash = unsigned.signing_hash();
        let signature = self
            .signer
            .sign(&prehash)
            .map_err(|e| DispatchError::SignFailure(e.to_string()))?;
        let signed = unsigned.into_signed(&signature);

        debug!(
            nonce,
            hash = %hex::encode(signed.hash),
            "broadcasting locally signed transaction"
        );
        Ok(self.provider.send_raw_transaction(&signed.raw).await?)
    }
}

// ============================================================
// Dispatcher
// ============================================================

/// Submits contract calls against a fixed contract through one backend.
pub struct Dispatcher {
    backend: Arc<dyn SignAndBroadcast>,
    contract: Address,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn SignAndBroadcast>, contract: Address) -> Self {
        Self { backend, contract }
    }

    /// The account transactions are dispatched from.
    pub fn sender(&self) -> Address {
        self.backend.sender()
    }

    /// The contract every call targets.
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Build, sign and submit `call`, resolving to its mined receipt.
    ///
    /// A mined-but-reverted transaction is an error here, not a receipt with
    /// a flag the caller might miss.
    pub async fn dispatch(
        &self,
        call: &ContractCall,
        options: CallOptions,
    ) -> Result<Receipt, DispatchError> {
        let tx = PendingTransaction {
            from: self.backend.sender(),
            to: self.contract,
            value: options.value,
            gas_limit: options.gas_limit.unwrap_or_else(|| call.gas_limit()),
            data: call.encoded().to_vec(),
        };

        debug!(call = call.name, gas = tx.gas_limit, "dispatching contract call");
        let receipt = self.backend.send(tx).await?;

        if !receipt.status {
            warn!(call = call.name, hash = %hex::encode(receipt.transaction_hash), "call reverted");
            return Err(DispatchError::ContractRevert(format!(
                "{} reverted in block {}",
                call.name, receipt.block_number
            )));
        }

        info!(
            call = call.name,
            hash = %hex::encode(receipt.transaction_hash),
            block = receipt.block_number,
            "contract call confirmed"
        );
        Ok(receipt)
    }
}
