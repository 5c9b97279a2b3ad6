use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use shared::protocol::{
    RpcRequest, RpcResponse, RpcTransactionReceipt, TransactionReceipt, TransactionRequest,
};
use tracing::debug;
use url::Url;

use crate::provider::{ProviderError, WalletProvider};

/// Wallet reached over HTTP JSON-RPC, e.g. a local signing wallet that shows its
/// own approval prompt for `eth_requestAccounts` and `eth_sendTransaction`.
pub struct JsonRpcWalletProvider {
    http: Client,
    endpoint: Url,
    poll_interval: Duration,
    next_id: AtomicU64,
}

impl JsonRpcWalletProvider {
    pub fn new(endpoint: &str, poll_interval: Duration) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            endpoint: Url::parse(endpoint)?,
            poll_interval,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<P, R>(&self, method: &str, params: P) -> Result<R, ProviderError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Unavailable(e.to_string())
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?
            .error_for_status()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let body: RpcResponse = res
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(err) = body.error {
            debug!(method, code = err.code, message = %err.message, "rpc call failed");
            if err.is_user_rejection() {
                return Err(ProviderError::UserRejected);
            }
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        serde_json::from_value(body.result.unwrap_or(Value::Null))
            .map_err(|e| ProviderError::Decode(format!("{method}: {e}")))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.call("eth_requestAccounts", json!([])).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        self.call("eth_sendTransaction", [tx]).await
    }

    async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> Result<TransactionReceipt, ProviderError> {
        loop {
            let receipt: Option<RpcTransactionReceipt> =
                self.call("eth_getTransactionReceipt", [tx_hash]).await?;
            match receipt {
                Some(receipt) => return Ok(receipt.into()),
                None => {
                    debug!(%tx_hash, "transaction not mined yet");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/rpc_provider_tests.rs"]
mod tests;
