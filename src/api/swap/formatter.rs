//! Turns an aggregator quote into the approval and trade transactions of an order.
//!
//! Everything in here is pure: inputs are borrowed, nothing fails. Parsing of
//! gas service output happens before ([`FeeEstimate::from_gas_estimate`]).

use std::collections::HashSet;

use ethers::types::U256;

use super::types::*;
use crate::core::abi::encode_approve;
use crate::core::errors::SwapError;
use crate::utils::{gwei_to_wei, to_hex_quantity};

/// Fee model applied to every transaction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeModel {
    Legacy,
    Eip1559,
}

impl FeeModel {
    /// EIP-1559 only when the network supports it and the wallet can sign type-2 transactions.
    pub fn select(network: &Network, account: &Account, unsupported: &HashSet<WalletId>) -> Self {
        if network.supports_eip1559 && !unsupported.contains(&account.wallet) {
            FeeModel::Eip1559
        } else {
            FeeModel::Legacy
        }
    }
}

/// Gas estimate converted to wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeEstimate {
    Legacy { gas_price: U256 },
    Eip1559 { max_fee_per_gas: U256, max_priority_fee_per_gas: U256 },
}

impl FeeEstimate {
    pub fn from_gas_estimate(estimate: &GasEstimate) -> Result<Self, SwapError> {
        let to_wei = |gwei: &str| {
            gwei_to_wei(gwei).map_err(|e| {
                SwapError::GasEstimateError(format!("malformed gas value '{}': {}", gwei, e))
            })
        };
        Ok(match estimate {
            GasEstimate::Legacy { gas_price } => FeeEstimate::Legacy { gas_price: to_wei(gas_price)? },
            GasEstimate::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas } => {
                FeeEstimate::Eip1559 {
                    max_fee_per_gas: to_wei(max_fee_per_gas)?,
                    max_priority_fee_per_gas: to_wei(max_priority_fee_per_gas)?,
                }
            }
        })
    }

    /// Fee fields for `model`. A legacy transaction priced from an EIP-1559
    /// estimate pays the fee cap; a type-2 transaction priced from a legacy
    /// estimate uses the gas price for both the cap and the tip.
    pub fn fields(&self, model: FeeModel) -> FeeFields {
        match (model, *self) {
            (FeeModel::Legacy, FeeEstimate::Legacy { gas_price })
            | (FeeModel::Legacy, FeeEstimate::Eip1559 { max_fee_per_gas: gas_price, .. }) => {
                FeeFields::Legacy { gas_price: to_hex_quantity(gas_price) }
            }
            (FeeModel::Eip1559, FeeEstimate::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas }) => {
                FeeFields::Eip1559 {
                    max_fee_per_gas: to_hex_quantity(max_fee_per_gas),
                    max_priority_fee_per_gas: to_hex_quantity(max_priority_fee_per_gas),
                    tx_type: EIP1559_TX_TYPE,
                }
            }
            (FeeModel::Eip1559, FeeEstimate::Legacy { gas_price }) => FeeFields::Eip1559 {
                max_fee_per_gas: to_hex_quantity(gas_price),
                max_priority_fee_per_gas: to_hex_quantity(gas_price),
                tx_type: EIP1559_TX_TYPE,
            },
        }
    }
}

/// Router call taken from a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeCall {
    pub to: String,
    pub data: String,
    pub value: U256,
}

impl From<&SwapQuote> for TradeCall {
    fn from(quote: &SwapQuote) -> Self {
        Self { to: quote.to.clone(), data: quote.data.clone(), value: quote.value }
    }
}

/// Everything about the order that does not come from the aggregator.
#[derive(Debug, Clone, Copy)]
pub struct OrderContext<'a> {
    pub network: &'a Network,
    pub account: &'a Account,
    pub sell_asset: &'a Asset,
    pub buy_asset: &'a Asset,
}

/// The trade transaction: call data verbatim, value hex-encoded, receiving asset tagged.
pub fn format_trade_tx(
    call: &TradeCall,
    fees: &FeeFields,
    network: &Network,
    buy_asset: &Asset,
) -> Transaction {
    Transaction {
        to: call.to.clone(),
        data: call.data.clone(),
        value: to_hex_quantity(call.value),
        chain_id: network.chain_id,
        tx_type: TxType::Swap,
        from: None,
        metadata: Some(TxMetadata { receiving_asset: buy_asset.uuid.clone() }),
        fees: fees.clone(),
    }
}

/// Allowance approval for the quote's spender, or `None` when no approval is needed.
pub fn format_approve_tx(
    quote: &SwapQuote,
    fees: &FeeFields,
    ctx: &OrderContext<'_>,
) -> Option<Transaction> {
    let spender = quote.allowance_target?;
    if ctx.sell_asset.is_native() {
        return None;
    }
    let token = ctx.sell_asset.contract_address?;

    Some(Transaction {
        to: format!("{:?}", token),
        data: encode_approve(&spender, quote.sell_amount),
        value: to_hex_quantity(U256::zero()),
        chain_id: ctx.network.chain_id,
        tx_type: TxType::Approval,
        from: Some(ctx.account.address),
        metadata: None,
        fees: fees.clone(),
    })
}

/// Build the full order for a quote. The fee model is decided once for both transactions.
pub fn format_order(
    quote: &SwapQuote,
    fee: &FeeEstimate,
    ctx: &OrderContext<'_>,
    eip1559_unsupported: &HashSet<WalletId>,
) -> OrderDetails {
    let model = FeeModel::select(ctx.network, ctx.account, eip1559_unsupported);
    let fees = fee.fields(model);

    OrderDetails {
        approval_tx: format_approve_tx(quote, &fees, ctx),
        trade_tx: format_trade_tx(&TradeCall::from(quote), &fees, ctx.network, ctx.buy_asset),
    }
}
