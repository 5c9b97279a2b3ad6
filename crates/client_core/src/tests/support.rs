//! Scripted wallet provider shared by the unit tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex as StdMutex,
};

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use shared::protocol::{TransactionReceipt, TransactionRequest};
use tokio::sync::Notify;

use crate::{
    abi::FunctionCall,
    config::ContractConfig,
    provider::{ProviderError, WalletProvider},
};

pub const TX_HASH: TxHash = TxHash::repeat_byte(0x42);

pub fn wallet_address() -> Address {
    Address::repeat_byte(0xab)
}

pub fn contract_address() -> Address {
    Address::repeat_byte(0x11)
}

pub fn fee() -> U256 {
    U256::from(100_000_000_000_000_000u64)
}

pub fn contract_config() -> ContractConfig {
    ContractConfig::new(
        contract_address(),
        FunctionCall::parse("requestCommission(string,string,string)").expect("signature"),
        fee(),
        10143,
    )
}

pub struct ScriptedProvider {
    available: bool,
    accounts: Result<Vec<Address>, ProviderError>,
    send: Result<TxHash, ProviderError>,
    confirmation: Result<TransactionReceipt, ProviderError>,
    hang_confirmation: bool,
    send_gate: Option<Arc<Notify>>,
    pub send_started: Arc<Notify>,
    pub request_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub wait_calls: AtomicUsize,
    pub sent: StdMutex<Vec<TransactionRequest>>,
}

impl ScriptedProvider {
    pub fn approving(address: Address) -> Self {
        Self {
            available: true,
            accounts: Ok(vec![address]),
            send: Ok(TX_HASH),
            confirmation: Ok(TransactionReceipt {
                tx_hash: TX_HASH,
                block_number: Some(100),
                gas_used: Some(52_000),
                succeeded: true,
            }),
            hang_confirmation: false,
            send_gate: None,
            send_started: Arc::new(Notify::new()),
            request_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            wait_calls: AtomicUsize::new(0),
            sent: StdMutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        let mut provider = Self::approving(wallet_address());
        provider.available = false;
        provider
    }

    pub fn with_accounts(mut self, accounts: Result<Vec<Address>, ProviderError>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_send(mut self, send: Result<TxHash, ProviderError>) -> Self {
        self.send = send;
        self
    }

    pub fn with_confirmation(
        mut self,
        confirmation: Result<TransactionReceipt, ProviderError>,
    ) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn reverting(self) -> Self {
        self.with_confirmation(Ok(TransactionReceipt {
            tx_hash: TX_HASH,
            block_number: Some(100),
            gas_used: Some(30_000),
            succeeded: false,
        }))
    }

    pub fn hanging_confirmation(mut self) -> Self {
        self.hang_confirmation = true;
        self
    }

    /// `send_transaction` blocks until the gate is notified.
    pub fn with_send_gate(mut self, gate: Arc<Notify>) -> Self {
        self.send_gate = Some(gate);
        self
    }

    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.request_calls.load(Ordering::SeqCst)
    }

    pub fn waits(&self) -> usize {
        self.wait_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for ScriptedProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        self.accounts.clone()
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ProviderError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().expect("sent lock").push(tx);
        self.send_started.notify_one();
        if let Some(gate) = &self.send_gate {
            gate.notified().await;
        }
        self.send.clone()
    }

    async fn wait_for_confirmation(
        &self,
        _tx_hash: TxHash,
    ) -> Result<TransactionReceipt, ProviderError> {
        self.wait_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_confirmation {
            std::future::pending::<()>().await;
        }
        self.confirmation.clone()
    }
}
