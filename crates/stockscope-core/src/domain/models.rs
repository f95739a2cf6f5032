use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// Canonical current quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    /// Provider's latest trading day, passed through as received.
    pub timestamp: String,
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_finite("open", open)?;
        validate_finite("high", high)?;
        validate_finite("low", low)?;
        validate_finite("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Daily history for one symbol. `bars` is sorted newest first with unique dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResult {
    pub symbol: String,
    #[serde(rename = "data")]
    pub bars: Vec<Bar>,
    pub last_refreshed: String,
}

impl HistoryResult {
    pub fn newest(&self) -> Option<&Bar> {
        self.bars.first()
    }
}

/// Request pair for one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRequest {
    pub symbol: Symbol,
    pub api_key: crate::ApiKey,
}

impl MarketRequest {
    /// Validates raw caller input. Whitespace-only values are rejected.
    pub fn parse(symbol: &str, api_key: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol: Symbol::parse(symbol)?,
            api_key: crate::ApiKey::parse(api_key)?,
        })
    }
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
