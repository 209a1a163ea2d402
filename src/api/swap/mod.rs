//! DEX aggregation swap module
//!
//! Turns 0x quotes into approval/trade transaction pairs.

pub mod types;
pub mod formatter;
pub mod zeroex;
pub mod service;
pub mod handler;

pub use types::*;
pub use formatter::{format_approve_tx, format_order, format_trade_tx, FeeEstimate, FeeModel, OrderContext, TradeCall};
pub use service::DexService;
pub use zeroex::{SwapAggregator, ZeroExClient};
pub use handler::*;
