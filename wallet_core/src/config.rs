//! Wallet configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chainwallet_ledger::LedgerConfig;

use crate::WalletError;

/// Configuration for a ChainWallet instance.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Data directory for the device-local state store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Whether the full ledger snapshot is persisted alongside the wallet.
    #[serde(default = "default_true")]
    pub persist_ledger: bool,

    /// Secret the state encryption key is derived from.
    #[serde(default = "default_state_secret")]
    pub state_secret: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chain parameters.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./chainwallet_data")
}

fn default_true() -> bool {
    true
}

fn default_state_secret() -> String {
    "chainwallet-local-state".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persist_ledger: default_true(),
            state_secret: default_state_secret(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            ledger: LedgerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwallet_types::Amount;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = WalletConfig::from_toml_str("").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./chainwallet_data"));
        assert!(config.persist_ledger);
        assert_eq!(config.ledger, LedgerConfig::default());
        assert_eq!(config.ledger.difficulty.zeros(), 2);
        assert_eq!(config.ledger.mining_reward, Amount::new(10));
    }

    #[test]
    fn overrides_are_applied() {
        let config = WalletConfig::from_toml_str(
            r#"
            data_dir = "/tmp/cw"
            persist_ledger = false
            log_format = "json"

            [ledger]
            difficulty = 3
            mining_reward = 25
            max_seal_attempts = 1000000
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cw"));
        assert!(!config.persist_ledger);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.ledger.difficulty.zeros(), 3);
        assert_eq!(config.ledger.mining_reward, Amount::new(25));
        assert_eq!(config.ledger.max_seal_attempts, Some(1_000_000));
    }

    #[test]
    fn out_of_range_difficulty_is_rejected() {
        let err = WalletConfig::from_toml_str("[ledger]\ndifficulty = 65\n").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = WalletConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = WalletConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.ledger, config.ledger);
        assert_eq!(back.state_secret, config.state_secret);
    }
}
