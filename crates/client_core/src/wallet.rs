use std::sync::Arc;

use shared::{domain::Account, error::CommissionError};
use tracing::{info, warn};

use crate::provider::WalletProvider;

pub struct WalletConnector {
    provider: Arc<dyn WalletProvider>,
}

impl WalletConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }

    /// Asks the wallet to authorize an account, once, and returns the primary one.
    pub async fn connect(&self) -> Result<Account, CommissionError> {
        if !self.provider.is_available() {
            warn!("wallet connect: no provider available");
            return Err(CommissionError::WalletUnavailable);
        }

        let accounts = self.provider.request_accounts().await.map_err(|err| {
            warn!("wallet connect failed: {err}");
            CommissionError::from(err)
        })?;

        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| CommissionError::Provider("wallet returned no accounts".into()))?;

        let account = Account::new(address);
        info!(account = %account, "wallet connected");
        Ok(account)
    }
}

#[cfg(test)]
#[path = "tests/wallet_tests.rs"]
mod tests;
