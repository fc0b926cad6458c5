//! Runtime configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use credo_registry::RegistryConfig;
use credo_types::{LedgerParams, Participant, Value};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a Credo runtime.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Everything here is fixed at
/// initialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to record Prometheus metrics.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    /// Path to a snarkjs `verification_key.json`. When absent the runtime
    /// must be given a verifier explicitly.
    #[serde(default)]
    pub verification_key: Option<PathBuf>,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub ledger: LedgerParams,

    /// Initial value balances.
    #[serde(default)]
    pub genesis: Vec<GenesisAllocation>,
}

/// One initial balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    pub participant: Participant,
    /// Decimal value units, e.g. `"10.0"`.
    pub balance: Value,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            enable_metrics: default_true(),
            verification_key: None,
            registry: RegistryConfig::default(),
            ledger: LedgerParams::default(),
            genesis: Vec::new(),
        }
    }
}
