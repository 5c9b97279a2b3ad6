use std::{path::Path, sync::Arc, time::Duration};

use alloy_primitives::{utils::parse_ether, Address, U256};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    abi::{AbiError, FunctionCall},
    provider::{MissingWalletProvider, WalletProvider},
    rpc_provider::JsonRpcWalletProvider,
};

pub const DEFAULT_CONFIG_FILE: &str = "commission.toml";
pub const ENV_PREFIX: &str = "APP";
pub const COMMISSION_ARGUMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rpc_url: Option<String>,
    pub contract_address: Option<String>,
    pub function_signature: String,
    /// Fixed fee attached to every request, in whole native-currency units.
    pub fee: String,
    pub chain_id: u64,
    pub confirmation_poll_interval_ms: u64,
    /// `0` waits for confirmation indefinitely.
    pub confirmation_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: None,
            function_signature: "requestCommission(string,string,string)".into(),
            fee: "0.1".into(),
            chain_id: 10143,
            confirmation_poll_interval_ms: 1000,
            confirmation_timeout_secs: 180,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("contract_address is not configured")]
    MissingContractAddress,
    #[error("invalid contract_address '{0}'")]
    InvalidContractAddress(String),
    #[error("invalid fee '{0}'")]
    InvalidFee(String),
    #[error("invalid function_signature: {0}")]
    FunctionSignature(#[from] AbiError),
    #[error("function_signature must take {expected} string arguments, found {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("invalid rpc_url: {0}")]
    RpcUrl(#[from] url::ParseError),
}

/// Contract-facing configuration resolved from `Settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub contract_address: Address,
    pub call: FunctionCall,
    pub fee: U256,
    pub chain_id: u64,
    pub confirmation_timeout: Option<Duration>,
}

impl ContractConfig {
    pub fn new(contract_address: Address, call: FunctionCall, fee: U256, chain_id: u64) -> Self {
        Self {
            contract_address,
            call,
            fee,
            chain_id,
            confirmation_timeout: None,
        }
    }

    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }
}

impl Settings {
    pub fn contract_config(&self) -> Result<ContractConfig, SettingsError> {
        let raw_address = self
            .contract_address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SettingsError::MissingContractAddress)?;
        let contract_address = raw_address
            .parse::<Address>()
            .map_err(|_| SettingsError::InvalidContractAddress(raw_address.to_string()))?;

        let call = FunctionCall::parse(&self.function_signature)?;
        if call.arity() != COMMISSION_ARGUMENTS {
            return Err(SettingsError::Arity {
                expected: COMMISSION_ARGUMENTS,
                actual: call.arity(),
            });
        }

        let fee = parse_ether(self.fee.trim())
            .map_err(|_| SettingsError::InvalidFee(self.fee.clone()))?;

        Ok(
            ContractConfig::new(contract_address, call, fee, self.chain_id)
                .with_confirmation_timeout(self.confirmation_timeout()),
        )
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        match self.confirmation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn wallet_provider(&self) -> Result<Arc<dyn WalletProvider>, SettingsError> {
        match self.rpc_url.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => Ok(Arc::new(JsonRpcWalletProvider::new(
                url,
                Duration::from_millis(self.confirmation_poll_interval_ms),
            )?)),
            None => Ok(Arc::new(MissingWalletProvider)),
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render settings as toml")
    }
}

/// Defaults, then the optional file at `path`, then `APP__*` environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with_prefix(path, ENV_PREFIX)
}

pub fn load_settings_with_prefix(path: &Path, env_prefix: &str) -> anyhow::Result<Settings> {
    config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|cfg| cfg.try_deserialize::<Settings>())
        .with_context(|| format!("failed to load settings from '{}'", path.display()))
}
