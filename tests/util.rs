// Shared fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use defi_swap_wallet::api::swap::{Account, Asset, GasEstimate, Network, WalletId, ETH_UUID};
use defi_swap_wallet::blockchain::GasEstimator;
use defi_swap_wallet::core::errors::SwapError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ACCOUNT_ADDRESS: &str = "0xfe5443fac29fa621cfc33d41d1927fd0f5e0bb7c";
pub const DAI_ADDRESS: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
pub const EXCHANGE_PROXY: &str = "0xdef1c0ded9bec7f1a1670819833240f027b25eff";

pub const TRADE_DATA: &str = "0xd9627aa400000000000000000000000000000000000000000000000000000000000000800000000000000000000000000000000000000000000000000de0b6b3a76400000000000000000000000000000000000000000000000000000002429108b8f331000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000020000000000000000000000006b175474e89094c44da98b954eedeac495271d0f000000000000000000000000eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee869584cd0000000000000000000000001000000000000000000000000000000000000011000000000000000000000000000000000000000000000096596a1ef6601a8b3a";

pub const APPROVE_DATA: &str = "0x095ea7b3000000000000000000000000def1c0ded9bec7f1a1670819833240f027b25eff0000000000000000000000000000000000000000000000000de0b6b3a7640000";

pub fn network(supports_eip1559: bool) -> Network {
    Network {
        chain_id: 1,
        name: "Ethereum".to_string(),
        base_asset: ETH_UUID.to_string(),
        supports_eip1559,
    }
}

pub fn account(wallet: WalletId) -> Account {
    Account { address: ACCOUNT_ADDRESS.parse().unwrap(), wallet }
}

pub fn eth() -> Asset {
    Asset {
        uuid: ETH_UUID.to_string(),
        ticker: "ETH".to_string(),
        name: "Ethereum".to_string(),
        contract_address: None,
        decimals: 18,
    }
}

pub fn dai() -> Asset {
    Asset {
        uuid: "e1f698bf-cb85-5405-b563-14774af14bf1".to_string(),
        ticker: "DAI".to_string(),
        name: "Dai Stablecoin".to_string(),
        contract_address: Some(DAI_ADDRESS.parse().unwrap()),
        decimals: 18,
    }
}

/// 0x quote for selling 1 DAI into ETH.
pub fn swap_quote_json() -> Value {
    json!({
        "chainId": 1,
        "price": "0.000635244999412571",
        "guaranteedPrice": "0.000628892549418445",
        "to": EXCHANGE_PROXY,
        "data": TRADE_DATA,
        "value": "0",
        "gas": "111000",
        "estimatedGas": "111000",
        "gasPrice": "154000000000",
        "protocolFee": "0",
        "minimumProtocolFee": "0",
        "buyTokenAddress": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
        "sellTokenAddress": DAI_ADDRESS,
        "buyAmount": "635244999412571",
        "sellAmount": "1000000000000000000",
        "sources": [{ "name": "Uniswap_V2", "proportion": "1" }],
        "allowanceTarget": EXCHANGE_PROXY
    })
}

/// Gas service stand-in returning a fixed estimate and counting calls.
pub struct StubGas {
    pub estimate: GasEstimate,
    pub calls: AtomicUsize,
}

impl StubGas {
    pub fn legacy(gwei: &str) -> Self {
        Self { estimate: GasEstimate::Legacy { gas_price: gwei.to_string() }, calls: AtomicUsize::new(0) }
    }

    pub fn eip1559(max_fee: &str, max_priority_fee: &str) -> Self {
        Self {
            estimate: GasEstimate::Eip1559 {
                max_fee_per_gas: max_fee.to_string(),
                max_priority_fee_per_gas: max_priority_fee.to_string(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GasEstimator for StubGas {
    async fn estimate(&self, _network: &Network) -> Result<GasEstimate, SwapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.estimate.clone())
    }
}

/// Gas service that is always down.
pub struct FailingGas;

#[async_trait]
impl GasEstimator for FailingGas {
    async fn estimate(&self, _network: &Network) -> Result<GasEstimate, SwapError> {
        Err(SwapError::GasEstimateError("gas service unavailable".to_string()))
    }
}
