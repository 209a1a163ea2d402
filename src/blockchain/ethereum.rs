use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::U256,
    utils::format_units,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use super::traits::GasEstimator;
use crate::api::swap::types::{GasEstimate, Network};
use crate::core::config::SwapConfig;
use crate::core::errors::SwapError;

/// Gas estimator backed by the networks' JSON-RPC endpoints.
#[derive(Clone)]
pub struct RpcGasEstimator {
    providers: HashMap<u64, Provider<Http>>,
}

impl RpcGasEstimator {
    pub fn new(config: &SwapConfig) -> Result<Self, SwapError> {
        let mut providers = HashMap::with_capacity(config.networks.len());
        for network in config.networks.values() {
            providers.insert(
                network.chain_id,
                Self::provider(&network.rpc_url, config.http_timeout_secs)?,
            );
        }
        Ok(Self { providers })
    }

    /// Single-network estimator, mostly useful for tests.
    pub fn with_rpc_url(chain_id: u64, rpc_url: &str) -> Result<Self, SwapError> {
        let provider = Self::provider(rpc_url, SwapConfig::default().http_timeout_secs)?;
        Ok(Self { providers: HashMap::from([(chain_id, provider)]) })
    }

    fn provider(rpc_url: &str, timeout_secs: u64) -> Result<Provider<Http>, SwapError> {
        let rpc_url_clean = rpc_url.trim();
        let parsed_url = reqwest::Url::parse(rpc_url_clean).map_err(|e| {
            SwapError::ConfigError(format!("Invalid RPC URL '{}': {}", rpc_url_clean, e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SwapError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Provider::new(Http::new_with_client(parsed_url, client)))
    }

    fn provider_for(&self, chain_id: u64) -> Result<&Provider<Http>, SwapError> {
        self.providers.get(&chain_id).ok_or(SwapError::UnsupportedChain(chain_id))
    }
}

fn to_gwei(wei: U256) -> Result<String, SwapError> {
    format_units(wei, "gwei").map_err(|e| SwapError::GasEstimateError(e.to_string()))
}

#[async_trait]
impl GasEstimator for RpcGasEstimator {
    async fn estimate(&self, network: &Network) -> Result<GasEstimate, SwapError> {
        let provider = self.provider_for(network.chain_id)?;

        let estimate = if network.supports_eip1559 {
            let (max_fee, max_priority_fee) = provider
                .estimate_eip1559_fees(None)
                .await
                .map_err(|e| SwapError::GasEstimateError(format!("Failed to estimate fees: {}", e)))?;
            debug!("estimate_eip1559_fees got = 0x{:x} / 0x{:x}", max_fee, max_priority_fee);
            GasEstimate::Eip1559 {
                max_fee_per_gas: to_gwei(max_fee)?,
                max_priority_fee_per_gas: to_gwei(max_priority_fee)?,
            }
        } else {
            let gas_price = provider
                .get_gas_price()
                .await
                .map_err(|e| SwapError::GasEstimateError(format!("Failed to get gas price: {}", e)))?;
            debug!("get_gas_price got = 0x{:x}", gas_price);
            GasEstimate::Legacy { gas_price: to_gwei(gas_price)? }
        };

        info!(chain_id = network.chain_id, ?estimate, "Gas estimate fetched");
        Ok(estimate)
    }
}
