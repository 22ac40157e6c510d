//! Client configuration with TOML file support.

use paystream_transactions::payroll::{DEFAULT_BOOTSTRAP_FUNDING, DEFAULT_PAYROLL_DURATION};
use paystream_transactions::validation::validate_contracts;
use paystream_transactions::{Contracts, TypeTag};
use paystream_types::{Mist, Network, ObjectId, SuiAddress};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Gas budget per transaction, in MIST.
pub const DEFAULT_GAS_BUDGET: u64 = 20_000_000;

/// Configuration for the paystream client.
///
/// Loaded from TOML via [`ClientConfig::from_toml_file`]; every key is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_network")]
    pub network: Network,

    /// Fullnode JSON-RPC URL. Defaults to the public endpoint of `network`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Sui CLI keystore holding the signing keys.
    #[serde(default = "default_keystore_path")]
    pub keystore_path: PathBuf,

    /// Account to sign with. Defaults to the first key in the keystore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_address: Option<SuiAddress>,

    #[serde(default = "default_gas_budget")]
    pub gas_budget: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub contracts: ContractsConfig,

    #[serde(default)]
    pub payroll: PayrollConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsConfig {
    #[serde(default = "default_streaming_package")]
    pub streaming_package: ObjectId,
    #[serde(default = "default_vesting_package")]
    pub vesting_package: ObjectId,
    #[serde(default = "default_payroll_package")]
    pub payroll_package: ObjectId,
    #[serde(default = "default_coin_type")]
    pub coin_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// MIST deposited when a payroll is created.
    #[serde(default = "default_bootstrap_funding")]
    pub bootstrap_funding: u64,
    #[serde(default = "default_payroll_duration")]
    pub duration: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> Network {
    Network::Devnet
}

fn default_keystore_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".sui").join("sui_config").join("sui.keystore")
}

fn default_gas_budget() -> u64 {
    DEFAULT_GAS_BUDGET
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_streaming_package() -> ObjectId {
    Contracts::default().streaming_package
}

fn default_vesting_package() -> ObjectId {
    Contracts::default().vesting_package
}

fn default_payroll_package() -> ObjectId {
    Contracts::default().payroll_package
}

fn default_coin_type() -> String {
    "0x2::sui::SUI".to_string()
}

fn default_bootstrap_funding() -> u64 {
    DEFAULT_BOOTSTRAP_FUNDING.raw()
}

fn default_payroll_duration() -> u64 {
    DEFAULT_PAYROLL_DURATION
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gas_budget == 0 {
            return Err(ConfigError::Invalid {
                key: "gas_budget",
                reason: "must be greater than 0".into(),
            });
        }
        if self.payroll.bootstrap_funding == 0 {
            return Err(ConfigError::Invalid {
                key: "payroll.bootstrap_funding",
                reason: "must be greater than 0".into(),
            });
        }
        self.contracts.to_contracts().map(|_| ())
    }

    /// The configured RPC URL, or the network's public fullnode.
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.default_rpc_url().to_string())
    }

    pub fn contracts(&self) -> Result<Contracts, ConfigError> {
        self.contracts.to_contracts()
    }

    pub fn bootstrap_funding(&self) -> Mist {
        Mist::new(self.payroll.bootstrap_funding)
    }
}

impl ContractsConfig {
    pub fn to_contracts(&self) -> Result<Contracts, ConfigError> {
        let coin_type: TypeTag = self.coin_type.parse().map_err(|e| ConfigError::Invalid {
            key: "contracts.coin_type",
            reason: format!("{e}"),
        })?;
        let contracts = Contracts {
            streaming_package: self.streaming_package,
            vesting_package: self.vesting_package,
            payroll_package: self.payroll_package,
            coin_type,
        };
        validate_contracts(&contracts).map_err(|e| ConfigError::Invalid {
            key: "contracts.coin_type",
            reason: e.to_string(),
        })?;
        Ok(contracts)
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            streaming_package: default_streaming_package(),
            vesting_package: default_vesting_package(),
            payroll_package: default_payroll_package(),
            coin_type: default_coin_type(),
        }
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            bootstrap_funding: default_bootstrap_funding(),
            duration: default_payroll_duration(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: None,
            keystore_path: default_keystore_path(),
            active_address: None,
            gas_budget: default_gas_budget(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            contracts: ContractsConfig::default(),
            payroll: PayrollConfig::default(),
        }
    }
}
