use async_trait::async_trait;

use crate::api::swap::types::{GasEstimate, Network};
use crate::core::errors::SwapError;

/// Defines the interface of a gas price service.
#[async_trait]
pub trait GasEstimator: Send + Sync {
    /// Returns `GasEstimate::Eip1559` when the network supports EIP-1559,
    /// `GasEstimate::Legacy` otherwise. Values are gwei decimal strings.
    async fn estimate(&self, network: &Network) -> Result<GasEstimate, SwapError>;
}
