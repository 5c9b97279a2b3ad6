use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DraftField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    WalletUnavailable,
    UserRejected,
    NotConnected,
    Validation,
    TransactionReverted,
    Provider,
    SubmissionInFlight,
    ConfirmationTimeout,
    Disposed,
}

/// Every failure the wallet and submission workflow can report to a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommissionError {
    #[error("no wallet provider is available")]
    WalletUnavailable,
    #[error("request rejected in the wallet")]
    UserRejected,
    #[error("wallet is not connected")]
    NotConnected,
    #[error("invalid {0}")]
    Validation(DraftField),
    #[error("transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: TxHash },
    #[error("wallet provider error: {0}")]
    Provider(String),
    #[error("a commission request is already pending")]
    SubmissionInFlight,
    #[error("transaction {tx_hash} not confirmed after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: TxHash, waited_secs: u64 },
    #[error("the commission client has been shut down")]
    Disposed,
}

impl CommissionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::WalletUnavailable => ErrorCode::WalletUnavailable,
            Self::UserRejected => ErrorCode::UserRejected,
            Self::NotConnected => ErrorCode::NotConnected,
            Self::Validation(_) => ErrorCode::Validation,
            Self::TransactionReverted { .. } => ErrorCode::TransactionReverted,
            Self::Provider(_) => ErrorCode::Provider,
            Self::SubmissionInFlight => ErrorCode::SubmissionInFlight,
            Self::ConfirmationTimeout { .. } => ErrorCode::ConfirmationTimeout,
            Self::Disposed => ErrorCode::Disposed,
        }
    }

    /// Whether repeating the same action unchanged can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UserRejected | Self::Provider(_) | Self::ConfirmationTimeout { .. }
        )
    }

    pub fn invalid_field(&self) -> Option<DraftField> {
        match self {
            Self::Validation(field) => Some(*field),
            _ => None,
        }
    }
}

/// Tagged outcome stored in `SubmissionState::Failed` and rendered by views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReason {
    pub code: ErrorCode,
    pub message: String,
}

impl FailureReason {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&CommissionError> for FailureReason {
    fn from(value: &CommissionError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown draft field '{0}'")]
pub struct UnknownDraftField(pub String);
