// src/api/mod.rs

pub mod handlers;
pub mod server;
pub mod types;
pub mod swap;           // DEX aggregation swap module
