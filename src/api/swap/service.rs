//! Order orchestration: quote + gas estimate, then formatting.

use std::collections::HashSet;
use std::sync::Arc;

use ethers::types::U256;
use tracing::{debug, info, warn};

use super::formatter::{format_order, FeeEstimate, OrderContext};
use super::types::*;
use super::zeroex::{SwapAggregator, ZeroExClient};
use crate::blockchain::{GasEstimator, RpcGasEstimator};
use crate::core::config::SwapConfig;
use crate::core::errors::SwapError;
use crate::utils::positive_base_units;

/// Builds swap orders from aggregator quotes.
#[derive(Clone)]
pub struct DexService {
    aggregator: Arc<dyn SwapAggregator>,
    gas: Arc<dyn GasEstimator>,
    eip1559_unsupported: HashSet<WalletId>,
}

impl DexService {
    pub fn new(
        aggregator: Arc<dyn SwapAggregator>,
        gas: Arc<dyn GasEstimator>,
        eip1559_unsupported: HashSet<WalletId>,
    ) -> Self {
        Self { aggregator, gas, eip1559_unsupported }
    }

    /// Service wired to the 0x API and the configured RPC endpoints.
    pub fn from_config(config: &SwapConfig) -> Result<Self, SwapError> {
        Ok(Self::new(
            Arc::new(ZeroExClient::new(config)?),
            Arc::new(RpcGasEstimator::new(config)?),
            config.eip1559_unsupported_wallets.clone(),
        ))
    }

    /// Order selling exactly `sell_amount` (whole units of `sell_asset`).
    pub async fn get_order_details_from(
        &self,
        network: &Network,
        account: &Account,
        sell_asset: &Asset,
        buy_asset: &Asset,
        sell_amount: &str,
    ) -> Result<OrderDetails, SwapError> {
        let amount = positive_base_units(sell_amount, sell_asset.decimals)?;
        let ctx = OrderContext { network, account, sell_asset, buy_asset };
        self.order_details(&ctx, TradeSide::Sell, amount).await
    }

    /// Order buying exactly `buy_amount` (whole units of `buy_asset`).
    pub async fn get_order_details_to(
        &self,
        network: &Network,
        account: &Account,
        sell_asset: &Asset,
        buy_asset: &Asset,
        buy_amount: &str,
    ) -> Result<OrderDetails, SwapError> {
        let amount = positive_base_units(buy_amount, buy_asset.decimals)?;
        let ctx = OrderContext { network, account, sell_asset, buy_asset };
        self.order_details(&ctx, TradeSide::Buy, amount).await
    }

    /// Dispatch on the request's trade side.
    pub async fn get_order_details(&self, request: &OrderRequest) -> Result<OrderDetails, SwapError> {
        match request.side {
            TradeSide::Sell => {
                self.get_order_details_from(
                    &request.network,
                    &request.account,
                    &request.sell_asset,
                    &request.buy_asset,
                    &request.amount,
                )
                .await
            }
            TradeSide::Buy => {
                self.get_order_details_to(
                    &request.network,
                    &request.account,
                    &request.sell_asset,
                    &request.buy_asset,
                    &request.amount,
                )
                .await
            }
        }
    }

    /// Indicative price for selling `sell_amount` of `sell_asset`.
    pub async fn get_token_price_from(
        &self,
        network: &Network,
        sell_asset: &Asset,
        buy_asset: &Asset,
        sell_amount: &str,
    ) -> Result<SwapPrice, SwapError> {
        let request = QuoteRequest {
            sell_token: sell_asset.aggregator_token(),
            buy_token: buy_asset.aggregator_token(),
            side: TradeSide::Sell,
            amount: positive_base_units(sell_amount, sell_asset.decimals)?,
            taker_address: None,
        };
        self.aggregator.get_price(network.chain_id, &request).await
    }

    async fn order_details(
        &self,
        ctx: &OrderContext<'_>,
        side: TradeSide,
        amount: U256,
    ) -> Result<OrderDetails, SwapError> {
        let request = QuoteRequest {
            sell_token: ctx.sell_asset.aggregator_token(),
            buy_token: ctx.buy_asset.aggregator_token(),
            side,
            amount,
            taker_address: Some(ctx.account.address),
        };
        info!(
            chain_id = ctx.network.chain_id,
            sell = %ctx.sell_asset.ticker,
            buy = %ctx.buy_asset.ticker,
            ?side,
            %amount,
            "Requesting swap order"
        );

        let (quote, estimate) = tokio::try_join!(
            self.aggregator.get_quote(ctx.network.chain_id, &request),
            self.gas.estimate(ctx.network),
        )
        .map_err(|e| {
            warn!("Swap order failed: {}", e);
            e
        })?;
        debug!(?estimate, "Quote and gas estimate received");

        let fee = FeeEstimate::from_gas_estimate(&estimate)?;
        let order = format_order(&quote, &fee, ctx, &self.eip1559_unsupported);
        info!(
            chain_id = ctx.network.chain_id,
            with_approval = order.approval_tx.is_some(),
            "Swap order formatted"
        );
        Ok(order)
    }
}
