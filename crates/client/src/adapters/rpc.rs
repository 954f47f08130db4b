//! # JSON-RPC Provider
//!
//! HTTP JSON-RPC adapter behind the dispatch `Provider` port. Broadcasts
//! resolve by polling for the transaction receipt; reads go straight
//! through. No retry beyond the receipt poll.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use ethmission_dispatch::{Provider, ProviderError, Receipt};
use ethmission_types::{Address, U256};

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

/// HTTP JSON-RPC chain provider.
pub struct RpcProvider {
    client: HttpClient,
    url: String,
    request_id: AtomicU64,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ProviderError(e.to_string()))?;

        Ok(Self { client, url: url.into(), request_id: AtomicU64::new(1) })
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn rpc<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ProviderError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError(format!("cannot connect to {}", self.url))
                } else {
                    ProviderError(e.to_string())
                }
            })?;

        let body: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ProviderError(format!("malformed RPC response: {e}")))?;

        if let Some(error) = body.error {
            return Err(ProviderError(format!("{} ({})", error.message, error.code)));
        }
        body.result
            .ok_or_else(|| ProviderError("missing result in RPC response".to_string()))
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<Receipt, ProviderError> {
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            let found: Option<RpcReceipt> =
                self.rpc("eth_getTransactionReceipt", json!([tx_hash])).await?;
            if let Some(receipt) = found {
                return receipt.try_into();
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(ProviderError(format!("transaction {tx_hash} not mined in time")))
    }
}

#[async_trait]
impl Provider for RpcProvider {
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Receipt, ProviderError> {
        let tx_hash: String = self
            .rpc("eth_sendRawTransaction", json!([format!("0x{}", hex::encode(raw))]))
            .await?;

        debug!(hash = %tx_hash, "raw transaction accepted, awaiting receipt");
        self.wait_for_receipt(&tx_hash).await
    }

    async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let result: String = self
            .rpc(
                "eth_call",
                json!([{ "to": to.to_hex(), "data": format!("0x{}", hex::encode(data)) }, "latest"]),
            )
            .await?;
        parse_hex_bytes(&result)
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError> {
        let result: String = self
            .rpc("eth_getBalance", json!([address.to_hex(), "latest"]))
            .await?;
        parse_quantity(&result)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, ProviderError> {
        let result: String = self
            .rpc("eth_getTransactionCount", json!([address.to_hex(), "pending"]))
            .await?;
        Ok(parse_quantity(&result)?.low_u64())
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        let result: String = self.rpc("eth_gasPrice", json!([])).await?;
        parse_quantity(&result)
    }
}

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcReceipt {
    #[serde(rename = "transactionHash")]
    transaction_hash: String,
    #[serde(rename = "blockNumber")]
    block_number: String,
    status: String,
}

impl TryFrom<RpcReceipt> for Receipt {
    type Error = ProviderError;

    fn try_from(raw: RpcReceipt) -> Result<Self, ProviderError> {
        let hash_bytes = parse_hex_bytes(&raw.transaction_hash)?;
        let transaction_hash: [u8; 32] = hash_bytes
            .try_into()
            .map_err(|_| ProviderError("transaction hash is not 32 bytes".to_string()))?;

        Ok(Receipt {
            transaction_hash,
            block_number: parse_quantity(&raw.block_number)?.low_u64(),
            status: parse_quantity(&raw.status)? == U256::one(),
        })
    }
}

fn strip_0x(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

fn parse_quantity(value: &str) -> Result<U256, ProviderError> {
    U256::from_str_radix(strip_0x(value), 16)
        .map_err(|e| ProviderError(format!("bad hex quantity {value:?}: {e}")))
}

fn parse_hex_bytes(value: &str) -> Result<Vec<u8>, ProviderError> {
    hex::decode(strip_0x(value)).map_err(|e| ProviderError(format!("bad hex data {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_variants() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::zero());
        assert_eq!(parse_quantity("0x2a").unwrap(), U256::from(42u8));
        assert_eq!(parse_quantity("1f").unwrap(), U256::from(31u8));
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_receipt_conversion() {
        let raw = RpcReceipt {
            transaction_hash: format!("0x{}", hex::encode([0xAB; 32])),
            block_number: "0x10".to_string(),
            status: "0x1".to_string(),
        };
        let receipt: Receipt = raw.try_into().unwrap();

        assert_eq!(receipt.transaction_hash, [0xAB; 32]);
        assert_eq!(receipt.block_number, 16);
        assert!(receipt.status);
    }

    #[test]
    fn test_reverted_receipt_status() {
        let raw = RpcReceipt {
            transaction_hash: format!("0x{}", hex::encode([0u8; 32])),
            block_number: "0x1".to_string(),
            status: "0x0".to_string(),
        };
        let receipt: Receipt = raw.try_into().unwrap();
        assert!(!receipt.status);
    }

    #[test]
    fn test_short_hash_rejected() {
        let raw = RpcReceipt {
            transaction_hash: "0xabcd".to_string(),
            block_number: "0x1".to_string(),
            status: "0x1".to_string(),
        };
        assert!(Receipt::try_from(raw).is_err());
    }
}
