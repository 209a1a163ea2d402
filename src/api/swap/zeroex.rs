//! 0x Swap API integration

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use super::types::*;
use crate::core::config::SwapConfig;
use crate::core::errors::SwapError;

/// Source of swap quotes and indicative prices.
#[async_trait]
pub trait SwapAggregator: Send + Sync {
    /// Firm quote with call data for `request` on `chain_id`.
    async fn get_quote(&self, chain_id: u64, request: &QuoteRequest) -> Result<SwapQuote, SwapError>;

    /// Indicative price without call data.
    async fn get_price(&self, chain_id: u64, request: &QuoteRequest) -> Result<SwapPrice, SwapError>;
}

/// Default 0x API host per chain.
pub fn default_base_url(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("https://api.0x.org"),
        3 => Some("https://ropsten.api.0x.org"),
        10 => Some("https://optimism.api.0x.org"),
        56 => Some("https://bsc.api.0x.org"),
        137 => Some("https://polygon.api.0x.org"),
        250 => Some("https://fantom.api.0x.org"),
        42161 => Some("https://arbitrum.api.0x.org"),
        43114 => Some("https://avalanche.api.0x.org"),
        _ => None,
    }
}

/// 0x API client
pub struct ZeroExClient {
    client: Client,
    api_key: Option<String>,
    base_url_override: Option<String>,
    affiliate_address: Option<String>,
    slippage_percentage: Option<f64>,
}

impl ZeroExClient {
    pub fn new(config: &SwapConfig) -> Result<Self, SwapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| SwapError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.zeroex_api_key.clone(),
            base_url_override: config.aggregator_url.clone(),
            affiliate_address: config.affiliate_address.clone(),
            slippage_percentage: config.slippage_percentage,
        })
    }

    fn base_url(&self, chain_id: u64) -> Result<String, SwapError> {
        if let Some(url) = &self.base_url_override {
            return Ok(url.trim_end_matches('/').to_string());
        }
        default_base_url(chain_id)
            .map(str::to_string)
            .ok_or(SwapError::UnsupportedChain(chain_id))
    }

    fn query_params(&self, request: &QuoteRequest, firm: bool) -> Vec<(&'static str, String)> {
        let amount_key = match request.side {
            TradeSide::Sell => "sellAmount",
            TradeSide::Buy => "buyAmount",
        };
        let mut params = vec![
            ("sellToken", request.sell_token.clone()),
            ("buyToken", request.buy_token.clone()),
            (amount_key, request.amount.to_string()),
        ];
        if let Some(taker) = request.taker_address {
            params.push(("takerAddress", format!("{:?}", taker)));
        }
        if firm {
            if let Some(affiliate) = &self.affiliate_address {
                params.push(("affiliateAddress", affiliate.clone()));
            }
            if let Some(slippage) = self.slippage_percentage {
                params.push(("slippagePercentage", slippage.to_string()));
            }
            // The wallet estimates gas itself and the taker may not hold an allowance yet.
            params.push(("skipValidation", "true".to_string()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        chain_id: u64,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, SwapError> {
        let url = format!("{}{}", self.base_url(chain_id)?, path);
        debug!(%url, "0x API request");

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.api_key {
            request = request.header("0x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SwapError::NetworkError(format!("0x API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SwapError::UpstreamError { status: status.as_u16(), body });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SwapError::NetworkError(format!("0x API read failed: {}", e)))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SwapAggregator for ZeroExClient {
    async fn get_quote(&self, chain_id: u64, request: &QuoteRequest) -> Result<SwapQuote, SwapError> {
        let params = self.query_params(request, true);
        let quote: SwapQuote = self.get_json(chain_id, "/swap/v1/quote", &params).await?;
        info!(
            chain_id,
            sell_amount = %quote.sell_amount,
            buy_amount = %quote.buy_amount,
            needs_allowance = quote.allowance_target.is_some(),
            "Received swap quote"
        );
        Ok(quote)
    }

    async fn get_price(&self, chain_id: u64, request: &QuoteRequest) -> Result<SwapPrice, SwapError> {
        let params = self.query_params(request, false);
        self.get_json(chain_id, "/swap/v1/price", &params).await
    }
}

/// Read the 0x API key from the environment.
pub fn get_zeroex_api_key() -> Option<String> {
    std::env::var("ZEROEX_API_KEY").ok().filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::U256;

    fn client(config: SwapConfig) -> ZeroExClient {
        ZeroExClient::new(&config).unwrap()
    }

    fn request(side: TradeSide) -> QuoteRequest {
        QuoteRequest {
            sell_token: "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
            buy_token: NATIVE_ASSET_ADDRESS.to_string(),
            side,
            amount: U256::from(10u64).pow(U256::from(18u64)),
            taker_address: None,
        }
    }

    #[test]
    fn test_base_url_per_chain() {
        let c = client(SwapConfig::default());
        assert_eq!(c.base_url(1).unwrap(), "https://api.0x.org");
        assert_eq!(c.base_url(137).unwrap(), "https://polygon.api.0x.org");
        assert!(matches!(c.base_url(5), Err(SwapError::UnsupportedChain(5))));
    }

    #[test]
    fn test_base_url_override_applies_to_all_chains() {
        let c = client(SwapConfig {
            aggregator_url: Some("http://127.0.0.1:9999/".to_string()),
            ..SwapConfig::default()
        });
        assert_eq!(c.base_url(5).unwrap(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_query_params_follow_trade_side() {
        let c = client(SwapConfig::default());
        let sell = c.query_params(&request(TradeSide::Sell), false);
        assert!(sell.iter().any(|(k, v)| *k == "sellAmount" && v == "1000000000000000000"));
        assert!(!sell.iter().any(|(k, _)| *k == "skipValidation"));

        let buy = c.query_params(&request(TradeSide::Buy), true);
        assert!(buy.iter().any(|(k, _)| *k == "buyAmount"));
        assert!(buy.iter().any(|(k, _)| *k == "skipValidation"));
    }
}
