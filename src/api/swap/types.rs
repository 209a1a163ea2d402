//! DEX swap data types

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::tools::serdes::{nonzero_address, option_quantity, quantity};

/// Identifier of the Ethereum base asset in asset catalogs.
pub const ETH_UUID: &str = "356a192b-7913-504c-9457-4d18c28d46e6";

/// Placeholder token address aggregators use for a chain's native asset.
pub const NATIVE_ASSET_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Transaction `type` value of EIP-1559 (type-2) transactions.
pub const EIP1559_TX_TYPE: u8 = 2;

/// Wallet integrations an account can be backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletId {
    Web3,
    LedgerNanoS,
    LedgerNanoSNew,
    Trezor,
    TrezorNew,
    Gridplus,
    WalletConnect,
    PrivateKey,
    KeystoreFile,
    MnemonicPhrase,
    ViewOnly,
}

/// EVM network the swap is executed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub chain_id: u64,
    #[serde(default)]
    pub name: String,
    /// Identifier of the asset fees are paid in.
    #[serde(default)]
    pub base_asset: String,
    #[serde(default, rename = "supportsEIP1559")]
    pub supports_eip1559: bool,
}

/// Account that signs the produced transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: Address,
    pub wallet: WalletId,
}

/// Token descriptor. The native asset has no contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub uuid: String,
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    #[serde(default = "Asset::default_decimals")]
    pub decimals: u32,
}

impl Asset {
    fn default_decimals() -> u32 {
        18
    }

    pub fn is_native(&self) -> bool {
        match self.contract_address {
            None => true,
            Some(addr) => format!("{:?}", addr).eq_ignore_ascii_case(NATIVE_ASSET_ADDRESS),
        }
    }

    /// Token identifier sent to the aggregator.
    pub fn aggregator_token(&self) -> String {
        match self.contract_address {
            Some(addr) if !self.is_native() => format!("{:?}", addr),
            _ => NATIVE_ASSET_ADDRESS.to_string(),
        }
    }
}

/// Which side of the trade the requested amount fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    /// Exact amount of the sell asset.
    Sell,
    /// Exact amount of the buy asset.
    Buy,
}

/// Aggregator quote request in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub sell_token: String,
    pub buy_token: String,
    pub side: TradeSide,
    pub amount: U256,
    pub taker_address: Option<Address>,
}

/// Firm quote returned by the aggregator, carrying ready-to-send call data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub guaranteed_price: Option<String>,
    pub to: String,
    pub data: String,
    #[serde(with = "quantity")]
    pub value: U256,
    #[serde(default, with = "option_quantity", skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(default, with = "option_quantity", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(with = "quantity")]
    pub buy_amount: U256,
    #[serde(with = "quantity")]
    pub sell_amount: U256,
    #[serde(default)]
    pub buy_token_address: Option<String>,
    #[serde(default)]
    pub sell_token_address: Option<String>,
    #[serde(default, with = "nonzero_address", skip_serializing_if = "Option::is_none")]
    pub allowance_target: Option<Address>,
}

/// Indicative price, no call data attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPrice {
    pub price: String,
    #[serde(with = "quantity")]
    pub buy_amount: U256,
    #[serde(with = "quantity")]
    pub sell_amount: U256,
    #[serde(default, with = "option_quantity", skip_serializing_if = "Option::is_none")]
    pub estimated_gas: Option<U256>,
    #[serde(default, with = "nonzero_address", skip_serializing_if = "Option::is_none")]
    pub allowance_target: Option<Address>,
}

/// Gas estimate as reported by the gas service, in gwei decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GasEstimate {
    #[serde(rename_all = "camelCase")]
    Eip1559 { max_fee_per_gas: String, max_priority_fee_per_gas: String },
    #[serde(rename_all = "camelCase")]
    Legacy { gas_price: String },
}

/// Kind of transaction in an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    Approval,
    Swap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxMetadata {
    pub receiving_asset: String,
}

/// Fee fields of a transaction; exactly one fee model per transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeFields {
    #[serde(rename_all = "camelCase")]
    Eip1559 {
        max_fee_per_gas: String,
        max_priority_fee_per_gas: String,
        #[serde(rename = "type")]
        tx_type: u8,
    },
    #[serde(rename_all = "camelCase")]
    Legacy { gas_price: String },
}

/// Unsigned transaction handed to the signing subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub to: String,
    pub data: String,
    pub value: String,
    pub chain_id: u64,
    pub tx_type: TxType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TxMetadata>,
    #[serde(flatten)]
    pub fees: FeeFields,
}

/// Result of an order: optional allowance approval followed by the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_tx: Option<Transaction>,
    pub trade_tx: Transaction,
}

impl OrderDetails {
    /// Transactions in the order they must be broadcast.
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.approval_tx.iter().chain(std::iter::once(&self.trade_tx)).collect()
    }
}

/// Order request accepted by the HTTP and CLI surfaces.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub network: Network,
    pub account: Account,
    pub sell_asset: Asset,
    pub buy_asset: Asset,
    /// Decimal amount in whole-token units.
    pub amount: String,
    #[serde(default = "OrderRequest::default_side")]
    pub side: TradeSide,
}

impl OrderRequest {
    fn default_side() -> TradeSide {
        TradeSide::Sell
    }
}
