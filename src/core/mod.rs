pub mod abi;
pub mod config;
pub mod errors;

pub use config::SwapConfig;
pub use errors::SwapError;
