use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use shared::{
    error::CommissionError,
    protocol::{TransactionReceipt, TransactionRequest},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("wallet provider unavailable: {0}")]
    Unavailable(String),
    #[error("request rejected by user")]
    UserRejected,
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Decode(String),
}

impl From<ProviderError> for CommissionError {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::Unavailable(_) => CommissionError::WalletUnavailable,
            ProviderError::UserRejected => CommissionError::UserRejected,
            other => CommissionError::Provider(other.to_string()),
        }
    }
}

/// Capability surface of a wallet: account authorization, signing and broadcast,
/// and waiting for the chain to mine a transaction.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is present at all. `false` short-circuits connect.
    fn is_available(&self) -> bool {
        true
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Signs and broadcasts; may block while the user approves in the wallet UI.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Resolves once the transaction is mined, whether it succeeded or reverted.
    async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
    ) -> Result<TransactionReceipt, ProviderError>;
}

pub struct MissingWalletProvider;

#[async_trait]
impl WalletProvider for MissingWalletProvider {
    fn is_available(&self) -> bool {
        false
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Err(ProviderError::Unavailable("no wallet provider configured".into()))
    }

    async fn send_transaction(&self, _tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        Err(ProviderError::Unavailable("no wallet provider configured".into()))
    }

    async fn wait_for_confirmation(
        &self,
        _tx_hash: TxHash,
    ) -> Result<TransactionReceipt, ProviderError> {
        Err(ProviderError::Unavailable("no wallet provider configured".into()))
    }
}
