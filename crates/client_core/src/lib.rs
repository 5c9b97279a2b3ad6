//! Wallet and commission-request workflow for the CommissionConnect client.

pub mod abi;
pub mod app;
pub mod config;
pub mod form;
pub mod provider;
pub mod roster;
pub mod rpc_provider;
pub mod submitter;
pub mod wallet;

pub use app::{AppSnapshot, ClientEvent, CommissionApp};
pub use config::{load_settings, ContractConfig, Settings, SettingsError};
pub use form::CommissionFormStore;
pub use provider::{MissingWalletProvider, ProviderError, WalletProvider};
pub use roster::{Artist, Roster};
pub use rpc_provider::JsonRpcWalletProvider;
pub use submitter::{CommissionSubmitter, PreparedSubmission};
pub use wallet::WalletConnector;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
