//! # Stockscope Core
//!
//! Market data gateway and presentation pipeline for the stockscope tools.
//!
//! ## Overview
//!
//! - **Gateway** for the Alpha Vantage global quote and compact daily series
//! - **Signal classifier** that turns error and throttle notices into typed failures
//! - **Transforms** from the provider's string-encoded payloads into canonical records
//! - **Period windowing** of daily bars for charting
//! - **Search orchestrator** that sequences the quote and history calls
//! - **Preferences** and **translations** for the renderers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage gateway |
//! | [`classify`] | Error / throttle signal detection |
//! | [`data_source`] | Gateway trait and failure taxonomy |
//! | [`domain`] | Domain models (QuoteRecord, Bar, HistoryResult, ChartPeriod) |
//! | [`error`] | Validation and preference errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`i18n`] | Languages and message catalog |
//! | [`logging`] | Tracing subscriber setup |
//! | [`orchestrator`] | Quote → delay → history state machine |
//! | [`preferences`] | Language, theme, and chart period storage |
//! | [`transform`] | Payload normalization |
//! | [`window`] | Trailing-period filter |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockscope_core::{AlphaVantageGateway, ChartPeriod, TradingDate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = AlphaVantageGateway::default();
//!
//!     let quote = gateway.fetch_quote("AAPL", "demo").await?;
//!     println!("{} {:.2}", quote.symbol, quote.price);
//!
//!     let history = gateway.fetch_history("AAPL", "demo").await?;
//!     let month = ChartPeriod::OneMonth.window(&history.bars, TradingDate::today_utc());
//!     println!("{} bars in the last month", month.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ Web API / CLI        │
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐     ┌──────────────────┐
//! │ Search Orchestrator  │────▶│ display slot     │
//! │ (quote, delay, hist) │     │ (watch channel)  │
//! └──────────┬───────────┘     └──────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐     ┌──────────────────┐
//! │ AlphaVantageGateway  │────▶│ HTTP Client      │
//! │ (MarketDataSource)   │     │ (reqwest)        │
//! └──────────┬───────────┘     └──────────────────┘
//!            │ classify → transform
//!            ▼
//! ┌──────────────────────┐
//! │ QuoteRecord / Bars   │──▶ window_by_period
//! └──────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Gateway calls return [`Outcome`], a `Result` over [`GatewayError`]:
//!
//! ```rust
//! use stockscope_core::{GatewayError, GatewayErrorKind};
//!
//! fn status_for(error: &GatewayError) -> u16 {
//!     match error.kind() {
//!         GatewayErrorKind::Invalid => 400,
//!         GatewayErrorKind::NotFound | GatewayErrorKind::ProviderRejected => 404,
//!         GatewayErrorKind::RateLimited => 429,
//!         GatewayErrorKind::UpstreamUnavailable | GatewayErrorKind::Malformed => 500,
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is forwarded upstream and nowhere else: it is never persisted,
//!   and neither the key nor the request URL is logged
//! - Inputs are validated before any network access

pub mod adapters;
pub mod classify;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod i18n;
pub mod logging;
pub mod orchestrator;
pub mod preferences;
pub mod transform;
pub mod window;

// Adapter implementations
pub use adapters::{AlphaVantageGateway, DEFAULT_BASE_URL};

// Signal classification
pub use classify::{classify, ProviderSignal};

// Gateway trait and failure taxonomy
pub use data_source::{GatewayError, GatewayErrorKind, MarketDataSource, Outcome, OutcomeFuture};

// Domain models
pub use domain::{
    ApiKey, Bar, ChartPeriod, HistoryResult, MarketRequest, QuoteRecord, Symbol, TradingDate,
};

// Error types
pub use error::{PreferenceError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
};

// Translations
pub use i18n::{BuiltinCatalog, Language, MessageCatalog};

// Logging
pub use logging::{LogFormat, LoggingConfig};

// Search sequencing
pub use orchestrator::{
    ChartState, SearchOrchestrator, SearchPhase, SearchView, MIN_HISTORY_DELAY,
};

// Preferences
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences, Theme,
};

// Payload transforms
pub use transform::{transform_daily_series, transform_quote, transform_series_meta, SeriesMeta};

// Windowing
pub use window::window_by_period;
