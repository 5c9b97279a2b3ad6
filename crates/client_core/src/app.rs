use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde::Serialize;
use shared::{
    domain::{Account, ArtistId, CommissionDraft, DraftField, Receipt, SubmissionState},
    error::{CommissionError, FailureReason},
};
use tokio::sync::{broadcast, watch, Mutex};
use tracing::info;

use crate::{
    config::ContractConfig, form::CommissionFormStore, provider::WalletProvider, roster::Roster,
    submitter::CommissionSubmitter, wallet::WalletConnector,
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum ClientEvent {
    AccountChanged(Account),
    ConnectFailed(FailureReason),
    CommissionConfirmed(Receipt),
    CommissionFailed(FailureReason),
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct AppSnapshot {
    pub account: Option<Account>,
    pub modal_visible: bool,
    pub draft: CommissionDraft,
    pub submission: SubmissionState,
}

/// Application state container. Views hold an `Arc<CommissionApp>` and mutate
/// state only through these operations.
pub struct CommissionApp {
    connector: WalletConnector,
    submitter: CommissionSubmitter,
    roster: Roster,
    account: Mutex<Option<Account>>,
    form: Mutex<CommissionFormStore>,
    disposed: AtomicBool,
    events: broadcast::Sender<ClientEvent>,
}

impl CommissionApp {
    pub fn new(provider: Arc<dyn WalletProvider>, contract: ContractConfig) -> Arc<Self> {
        Self::new_with_roster(provider, contract, Roster::fixed())
    }

    pub fn new_with_roster(
        provider: Arc<dyn WalletProvider>,
        contract: ContractConfig,
        roster: Roster,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            connector: WalletConnector::new(Arc::clone(&provider)),
            submitter: CommissionSubmitter::new(provider, contract),
            roster,
            account: Mutex::new(None),
            form: Mutex::new(CommissionFormStore::new()),
            disposed: AtomicBool::new(false),
            events,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn contract(&self) -> &ContractConfig {
        self.submitter.contract()
    }

    pub async fn connect_wallet(&self) -> Result<Account, CommissionError> {
        let result = self.connector.connect().await;
        if self.is_disposed() {
            return result;
        }

        match &result {
            Ok(account) => {
                *self.account.lock().await = Some(*account);
                self.emit(ClientEvent::AccountChanged(*account));
            }
            Err(err) => self.emit(ClientEvent::ConnectFailed(FailureReason::from(err))),
        }
        result
    }

    pub async fn open_commission(&self, artist: ArtistId) {
        self.form.lock().await.open(artist);
    }

    pub async fn update_field(&self, field: DraftField, value: impl Into<String>) {
        self.form.lock().await.update(field, value);
    }

    pub async fn close_modal(&self) {
        self.form.lock().await.close();
    }

    pub async fn submit_commission(&self) -> Result<Receipt, CommissionError> {
        if self.is_disposed() {
            return Err(CommissionError::Disposed);
        }
        let account = *self.account.lock().await;
        let result = self.submitter.submit(&self.form, account.as_ref()).await;

        if self.is_disposed() {
            return result;
        }
        match &result {
            Ok(receipt) => {
                info!(tx_hash = %receipt.tx_hash, "commission submitted");
                self.emit(ClientEvent::CommissionConfirmed(receipt.clone()));
            }
            // The pending request still owns the outcome.
            Err(CommissionError::SubmissionInFlight) => {}
            Err(err) => self.emit(ClientEvent::CommissionFailed(FailureReason::from(err))),
        }
        result
    }

    pub async fn account(&self) -> Option<Account> {
        *self.account.lock().await
    }

    pub async fn draft(&self) -> CommissionDraft {
        self.form.lock().await.draft().clone()
    }

    pub async fn submission_state(&self) -> SubmissionState {
        self.form.lock().await.submission_state()
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let account = *self.account.lock().await;
        let form = self.form.lock().await;
        AppSnapshot {
            account,
            modal_visible: form.is_modal_visible(),
            draft: form.draft().clone(),
            submission: form.submission_state(),
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn watch_submission(&self) -> watch::Receiver<SubmissionState> {
        self.form.lock().await.subscribe()
    }

    /// Detaches the view: results of operations still in flight are discarded
    /// and new submissions are refused.
    pub async fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.form.lock().await.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
