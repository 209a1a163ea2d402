use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::swap::types::{Network, WalletId};
use crate::core::errors::SwapError;

/// Blockchain network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    /// Identifier of the fee asset
    #[serde(default)]
    pub base_asset: String,
    #[serde(default)]
    pub supports_eip1559: bool,
}

impl NetworkConfig {
    pub fn network(&self) -> Network {
        Network {
            chain_id: self.chain_id,
            name: self.name.clone(),
            base_asset: self.base_asset.clone(),
            supports_eip1559: self.supports_eip1559,
        }
    }
}

/// Swap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConfig {
    /// Overrides the per-chain 0x host (used for staging and tests).
    #[serde(default)]
    pub aggregator_url: Option<String>,

    /// 0x API key
    #[serde(default)]
    pub zeroex_api_key: Option<String>,

    /// Affiliate address attached to firm quotes
    #[serde(default)]
    pub affiliate_address: Option<String>,

    /// Slippage tolerance as a fraction (0.01 = 1%)
    #[serde(default)]
    pub slippage_percentage: Option<f64>,

    /// HTTP timeout for aggregator and RPC calls (seconds)
    #[serde(default = "SwapConfig::default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Wallet types that cannot sign type-2 transactions
    #[serde(default = "SwapConfig::default_eip1559_unsupported_wallets")]
    pub eip1559_unsupported_wallets: HashSet<WalletId>,

    /// Networks keyed by short name
    #[serde(default = "SwapConfig::default_networks")]
    pub networks: HashMap<String, NetworkConfig>,

    /// Default translation language
    #[serde(default = "SwapConfig::default_language")]
    pub default_language: String,

    /// Directory holding `<lang>.json` translation catalogs
    #[serde(default = "SwapConfig::default_catalog_dir")]
    pub catalog_dir: PathBuf,
}

impl SwapConfig {
    fn default_http_timeout_secs() -> u64 { 10 }
    fn default_language() -> String { "en".to_string() }
    fn default_catalog_dir() -> PathBuf { PathBuf::from("resources/i18n") }

    fn default_eip1559_unsupported_wallets() -> HashSet<WalletId> {
        // Legacy Ledger and Trezor integrations predate type-2 signing support.
        [WalletId::LedgerNanoS, WalletId::Trezor].into_iter().collect()
    }

    fn default_networks() -> HashMap<String, NetworkConfig> {
        let mut networks = HashMap::with_capacity(3);

        networks.insert("eth".to_string(), NetworkConfig {
            name: "Ethereum".to_string(),
            rpc_url: "https://eth.llamarpc.com".to_string(),
            chain_id: 1,
            base_asset: "ETH".to_string(),
            supports_eip1559: true,
        });

        networks.insert("bsc".to_string(), NetworkConfig {
            name: "Binance Smart Chain".to_string(),
            rpc_url: "https://bsc-dataseed.binance.org".to_string(),
            chain_id: 56,
            base_asset: "BNB".to_string(),
            supports_eip1559: false,
        });

        networks.insert("polygon".to_string(), NetworkConfig {
            name: "Polygon".to_string(),
            rpc_url: "https://polygon-rpc.com".to_string(),
            chain_id: 137,
            base_asset: "MATIC".to_string(),
            supports_eip1559: true,
        });

        networks
    }

    /// Look a network up by chain id.
    pub fn network_by_chain_id(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.networks.values().find(|n| n.chain_id == chain_id)
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, SwapError> {
        toml::from_str(content).map_err(|e| SwapError::ConfigError(format!("Invalid config: {}", e)))
    }

    /// Load from `path`, falling back to defaults when the file does not exist,
    /// then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, SwapError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => {
                info!("Loaded swap config from {}", path.display());
                Self::from_toml_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, using default configuration", path.display());
                Self::default()
            }
            Err(e) => {
                return Err(SwapError::ConfigError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// `CONFIG_PATH` or `config.toml` in the working directory.
    pub fn load() -> Result<Self, SwapError> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    fn apply_env_overrides(&mut self) -> Result<(), SwapError> {
        if let Some(key) = crate::api::swap::zeroex::get_zeroex_api_key() {
            self.zeroex_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("ZEROEX_API_URL") {
            self.aggregator_url = Some(url);
        }
        if let Ok(secs) = std::env::var("SWAP_HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = secs.trim().parse().map_err(|_| {
                SwapError::ConfigError(format!("SWAP_HTTP_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
        }
        Ok(())
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            aggregator_url: None,
            zeroex_api_key: None,
            affiliate_address: None,
            slippage_percentage: None,
            http_timeout_secs: Self::default_http_timeout_secs(),
            eip1559_unsupported_wallets: Self::default_eip1559_unsupported_wallets(),
            networks: Self::default_networks(),
            default_language: Self::default_language(),
            catalog_dir: Self::default_catalog_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwapConfig::default();
        assert_eq!(config.http_timeout_secs, 10);
        assert!(config.eip1559_unsupported_wallets.contains(&WalletId::LedgerNanoS));
        assert!(!config.eip1559_unsupported_wallets.contains(&WalletId::LedgerNanoSNew));
        assert!(config.network_by_chain_id(1).unwrap().supports_eip1559);
        assert!(!config.network_by_chain_id(56).unwrap().supports_eip1559);
        assert_eq!(config.network_by_chain_id(56).unwrap().network().base_asset, "BNB");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SwapConfig::from_toml_str(
            r#"
eip1559_unsupported_wallets = ["TREZOR"]
slippage_percentage = 0.01

[networks.goerli]
name = "Goerli"
rpc_url = "http://localhost:8545"
chain_id = 5
supports_eip1559 = true
"#,
        )
        .unwrap();
        assert_eq!(config.eip1559_unsupported_wallets.len(), 1);
        assert!(config.eip1559_unsupported_wallets.contains(&WalletId::Trezor));
        assert_eq!(config.slippage_percentage, Some(0.01));
        assert_eq!(config.networks.len(), 1);
        assert_eq!(config.network_by_chain_id(5).unwrap().network().name, "Goerli");
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SwapConfig::from_toml_str("http_timeout_secs = \"soon\""),
            Err(SwapError::ConfigError(_))
        ));
    }
}
