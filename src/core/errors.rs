use thiserror::Error;

/// Error type for swap order building and the services behind it.
#[derive(Debug, Error)]
pub enum SwapError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failures talking to the aggregator or an RPC node.
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The aggregator answered with a non-success status.
    #[error("Upstream error {status}: {body}")]
    UpstreamError { status: u16, body: String },
    /// A response could not be decoded into the expected shape.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    /// No aggregator endpoint is known for the chain.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(u64),
    /// Amounts that are not positive decimal strings.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    /// Gas estimation failures.
    #[error("Gas estimation error: {0}")]
    GasEstimateError(String),
    /// Invalid input errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SwapError {
    /// Machine-readable code used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            SwapError::ConfigError(_) => "CONFIG_ERROR",
            SwapError::NetworkError(_) => "NETWORK_ERROR",
            SwapError::UpstreamError { .. } => "UPSTREAM_ERROR",
            SwapError::DeserializationError(_) => "MALFORMED_RESPONSE",
            SwapError::UnsupportedChain(_) => "UNSUPPORTED_NETWORK",
            SwapError::InvalidAmount(_) => "INVALID_AMOUNT",
            SwapError::GasEstimateError(_) => "GAS_ESTIMATE_FAILED",
            SwapError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Whether the failure was caused by the caller rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SwapError::UnsupportedChain(_) | SwapError::InvalidAmount(_) | SwapError::InvalidInput(_)
        )
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SwapError::DeserializationError(err.to_string())
        } else {
            SwapError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::DeserializationError(err.to_string())
    }
}

impl From<ethers::utils::ConversionError> for SwapError {
    fn from(err: ethers::utils::ConversionError) -> Self {
        SwapError::InvalidAmount(err.to_string())
    }
}
