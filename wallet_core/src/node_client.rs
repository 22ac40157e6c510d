//! JSON-RPC 2.0 client for a Sui fullnode.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use paystream_types::{ObjectId, SuiAddress};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::chain::{ChainClient, CoinPage, ExecuteOptions, ObjectData, ObjectOptions, TransactionResult};
use crate::error::ChainError;

/// Page size requested from `suix_getCoins`.
const COIN_PAGE_LIMIT: u64 = 50;

/// HTTP client for a fullnode's JSON-RPC endpoint.
///
/// Wraps `reqwest::Client` with the endpoint URL and exposes the handful of
/// methods the client needs through [`ChainClient`].
#[derive(Debug)]
pub struct SuiRpcClient {
    http: reqwest::Client,
    rpc_url: String,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct GetObjectResponse {
    #[serde(default)]
    data: Option<ObjectData>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl SuiRpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChainError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a request and return the raw `result` value.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChainError::Http(response.status().as_u16()));
        }

        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        parsed
            .result
            .ok_or_else(|| ChainError::InvalidResponse(format!("{method}: missing result")))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ChainError> {
        let result = self.rpc_call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("{method}: {e}")))
    }
}

impl ChainClient for SuiRpcClient {
    async fn get_object(
        &self,
        id: ObjectId,
        options: ObjectOptions,
    ) -> Result<Option<ObjectData>, ChainError> {
        let resp: GetObjectResponse = self
            .call(
                "sui_getObject",
                serde_json::json!([id.to_hex_literal(), options]),
            )
            .await?;
        if let Some(err) = resp.error {
            tracing::debug!(object = %id, error = %err, "object lookup returned error");
        }
        Ok(resp.data)
    }

    async fn get_coins(
        &self,
        owner: SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, ChainError> {
        self.call(
            "suix_getCoins",
            serde_json::json!([owner.to_hex_literal(), coin_type, cursor, COIN_PAGE_LIMIT]),
        )
        .await
    }

    async fn reference_gas_price(&self) -> Result<u64, ChainError> {
        let value = self
            .rpc_call("suix_getReferenceGasPrice", serde_json::json!([]))
            .await?;
        match &value {
            serde_json::Value::String(s) => s.parse().ok(),
            other => other.as_u64(),
        }
        .ok_or_else(|| ChainError::InvalidResponse(format!("gas price: {value}")))
    }

    async fn execute_transaction_block(
        &self,
        tx_bytes: &[u8],
        signatures: &[String],
        options: ExecuteOptions,
    ) -> Result<TransactionResult, ChainError> {
        self.call(
            "sui_executeTransactionBlock",
            serde_json::json!([
                BASE64.encode(tx_bytes),
                signatures,
                options,
                "WaitForLocalExecution"
            ]),
        )
        .await
    }
}
