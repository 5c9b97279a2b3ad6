use std::sync::Arc;

use alloy_primitives::U64;
use chrono::Utc;
use shared::{
    domain::{Account, CommissionRequest, Receipt, SubmissionState},
    error::CommissionError,
    protocol::{TransactionReceipt, TransactionRequest},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    abi::encode_call,
    config::ContractConfig,
    form::CommissionFormStore,
    provider::{ProviderError, WalletProvider},
};

/// A submission that passed the guards and moved the store to `Pending`.
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub session: u64,
    pub request: CommissionRequest,
    pub transaction: TransactionRequest,
}

pub struct CommissionSubmitter {
    provider: Arc<dyn WalletProvider>,
    contract: ContractConfig,
}

impl CommissionSubmitter {
    pub fn new(provider: Arc<dyn WalletProvider>, contract: ContractConfig) -> Self {
        Self { provider, contract }
    }

    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    /// Full lifecycle: guard, mark pending, send, await confirmation, settle.
    ///
    /// The store lock is only held for the synchronous steps, never across a
    /// wallet round trip.
    pub async fn submit(
        &self,
        store: &Mutex<CommissionFormStore>,
        account: Option<&Account>,
    ) -> Result<Receipt, CommissionError> {
        let prepared = {
            let mut guard = store.lock().await;
            self.prepare(&mut guard, account)?
        };

        let outcome = self.execute(&prepared).await;
        if let Err(err) = &outcome {
            warn!(session = prepared.session, "commission request failed: {err}");
        }

        store.lock().await.settle(prepared.session, &outcome);
        outcome
    }

    /// Checks the in-flight guard, connection and draft, then marks the store
    /// pending. Any error leaves the store untouched.
    pub fn prepare(
        &self,
        store: &mut CommissionFormStore,
        account: Option<&Account>,
    ) -> Result<PreparedSubmission, CommissionError> {
        if store.submission_state().is_pending() {
            return Err(CommissionError::SubmissionInFlight);
        }
        let account = account.ok_or(CommissionError::NotConnected)?;
        let request = store.request(self.contract.fee)?;

        let data = encode_call(
            self.contract.call.selector(),
            &[&request.title, &request.description, &request.reference_url],
        );
        let transaction = TransactionRequest {
            from: account.address,
            to: self.contract.contract_address,
            value: request.attached_value,
            data,
            chain_id: U64::from(self.contract.chain_id),
        };

        store.set_submission_state(SubmissionState::Pending);
        info!(
            session = store.session(),
            artist = ?store.target_artist(),
            from = %account,
            "commission request pending"
        );

        Ok(PreparedSubmission {
            session: store.session(),
            request,
            transaction,
        })
    }

    pub async fn execute(&self, prepared: &PreparedSubmission) -> Result<Receipt, CommissionError> {
        let tx_hash = self
            .provider
            .send_transaction(prepared.transaction.clone())
            .await
            .map_err(submit_error)?;
        info!(%tx_hash, "commission transaction broadcast");

        let receipt: TransactionReceipt = match self.contract.confirmation_timeout {
            Some(limit) => {
                tokio::time::timeout(limit, self.provider.wait_for_confirmation(tx_hash))
                    .await
                    .map_err(|_| CommissionError::ConfirmationTimeout {
                        tx_hash,
                        waited_secs: limit.as_secs(),
                    })?
            }
            None => self.provider.wait_for_confirmation(tx_hash).await,
        }
        .map_err(submit_error)?;

        if !receipt.succeeded {
            return Err(CommissionError::TransactionReverted {
                tx_hash: receipt.tx_hash,
            });
        }

        info!(
            %tx_hash,
            block = ?receipt.block_number,
            "commission transaction confirmed"
        );
        Ok(Receipt {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            confirmed_at: Utc::now(),
        })
    }
}

// A provider that vanished mid-submit is a transport failure, not a missing wallet.
fn submit_error(err: ProviderError) -> CommissionError {
    match err {
        ProviderError::Unavailable(message) => CommissionError::Provider(message),
        other => other.into(),
    }
}

#[cfg(test)]
#[path = "tests/submitter_tests.rs"]
mod tests;
