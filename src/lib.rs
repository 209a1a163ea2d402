#![allow(clippy::needless_return)]
#![allow(clippy::len_zero)]
// src/lib.rs

pub mod api;
pub mod blockchain;
pub mod core;
pub mod i18n;
pub mod tools;
pub mod utils;

pub use api::swap::{DexService, OrderDetails, Transaction};
pub use i18n::{translate_raw, Vars};
