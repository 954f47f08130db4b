//! # Ethmission Client Entry Point
//!
//! Loads configuration, initializes logging and stands the runtime up.
//! Wallet sessions are driven by the embedding surface; this binary checks
//! the provider connection and reports what the local store already knows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ethmission_client::adapters::{JsonFileStore, RpcProvider};
use ethmission_client::{Client, ClientConfig};
use ethmission_dispatch::Provider;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ETHMISSION_CONFIG").ok())
        .unwrap_or_else(|| "ethmission.json".to_string());
    let config = ClientConfig::load(&PathBuf::from(&config_path))
        .with_context(|| format!("loading configuration from {config_path}"))?;

    let provider = Arc::new(
        RpcProvider::new(config.provider.url.clone()).context("building RPC provider")?,
    );
    let store = Arc::new(
        JsonFileStore::open(config.store_path.clone()).context("opening local store")?,
    );

    info!(
        contract = %config.contract.address,
        provider = %config.provider.url,
        "ethmission client starting"
    );

    let gas_price = provider
        .gas_price()
        .await
        .context("provider connection check")?;
    info!(gas_price = %gas_price, "provider reachable");

    let client = Client::new(config, provider, store).context("building client runtime")?;
    for assignment in client.registry().list() {
        info!(
            role = %assignment.kind,
            name = %assignment.name,
            address = %assignment.address,
            "registered role"
        );
    }

    info!("runtime ready; connect a wallet to begin");
    Ok(())
}
