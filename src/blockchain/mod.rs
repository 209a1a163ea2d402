pub mod ethereum;
pub mod traits;

pub use ethereum::RpcGasEstimator;
pub use traits::GasEstimator;
