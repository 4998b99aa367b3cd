//! HTTP client layer — `LiquidNationHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::LiquidNationHttp;
pub use retry::{RetryConfig, RetryPolicy};
