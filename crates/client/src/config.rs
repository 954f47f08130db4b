//! # Client Configuration
//!
//! One JSON document loaded at startup. Wallet-dependent operation cannot
//! proceed without it, so a missing or malformed file is fatal.

use std::path::{Path, PathBuf};

use ethmission_types::Address;
use serde::Deserialize;

use crate::errors::ClientError;

/// Default ticket price: 0.01 native units per ticket.
pub const DEFAULT_TICKET_PRICE_WEI: u128 = 10_000_000_000_000_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Deployed ticket-token contract.
    pub address: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint.
    pub url: String,
    /// Chain id for locally signed transactions.
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    /// Address tickets are bought from and refunded to.
    pub address: Address,
}

/// Everything the runtime needs, deserialized once.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub contract: ContractConfig,
    pub provider: ProviderConfig,
    pub admin: SecretConfig,
    #[serde(default)]
    pub doorman: Option<SecretConfig>,
    pub vendor: VendorConfig,
    #[serde(default = "default_ticket_price")]
    pub ticket_price_wei: u128,
    /// Where the JSON file store lives.
    pub store_path: PathBuf,
}

fn default_ticket_price() -> u128 {
    DEFAULT_TICKET_PRICE_WEI
}

impl ClientConfig {
    /// Load and parse the configuration file.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        Self::from_slice(&bytes)
    }

    /// Parse a configuration document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClientError> {
        serde_json::from_slice(bytes).map_err(|e| ClientError::Config(e.to_string()))
    }
}
