//! # Domain Models
//!
//! Canonical records produced by the gateway and consumed by the chart.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker forwarded upstream |
//! | [`ApiKey`] | Redacted upstream credential |
//! | [`QuoteRecord`] | Current quote |
//! | [`Bar`] | One day of OHLCV data |
//! | [`HistoryResult`] | Daily bars for one symbol, newest first |
//! | [`TradingDate`] | Calendar date with calendar ordering |
//! | [`ChartPeriod`] | Trailing chart window (1W, 1M, 3M, 6M, 1Y) |
//!
//! Every record is built fresh for one request and never mutated afterwards.

mod models;
mod period;
mod symbol;
mod trading_date;

pub use models::{Bar, HistoryResult, MarketRequest, QuoteRecord};
pub use period::ChartPeriod;
pub use symbol::{ApiKey, Symbol};
pub use trading_date::TradingDate;
