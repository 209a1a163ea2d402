//! HTTP handlers outside the swap module

pub mod health;
pub mod i18n;

pub use health::health_check;
