//! Upstream provider adapters.

mod alphavantage;

pub use alphavantage::{AlphaVantageGateway, DEFAULT_BASE_URL};
