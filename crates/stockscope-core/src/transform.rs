//! Normalization of provider payloads into canonical records.
//!
//! The provider encodes every number as a string under numbered keys
//! (`"05. price"`, `"4. close"`). Missing fields and unparseable numbers are
//! reported as `Malformed`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Bar, GatewayError, Outcome, QuoteRecord, TradingDate};

#[derive(Debug, Deserialize)]
struct GlobalQuotePayload {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBarPayload {
    #[serde(rename = "1. open")]
    open: Option<String>,
    #[serde(rename = "2. high")]
    high: Option<String>,
    #[serde(rename = "3. low")]
    low: Option<String>,
    #[serde(rename = "4. close")]
    close: Option<String>,
    #[serde(rename = "5. volume")]
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesMetaPayload {
    #[serde(rename = "2. Symbol")]
    symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: Option<String>,
}

/// Metadata block of a daily series response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMeta {
    pub symbol: String,
    pub last_refreshed: String,
}

/// Maps the contents of a `"Global Quote"` object into a [`QuoteRecord`].
pub fn transform_quote(quote: Map<String, Value>) -> Outcome<QuoteRecord> {
    let raw: GlobalQuotePayload = decode("Global Quote", quote)?;

    Ok(QuoteRecord {
        symbol: require("01. symbol", raw.symbol)?,
        price: parse_price("05. price", require("05. price", raw.price)?.as_str())?,
        change: parse_price("09. change", require("09. change", raw.change)?.as_str())?,
        change_percent: parse_percent(require("10. change percent", raw.change_percent)?.as_str())?,
        high: parse_price("03. high", require("03. high", raw.high)?.as_str())?,
        low: parse_price("04. low", require("04. low", raw.low)?.as_str())?,
        volume: parse_volume("06. volume", require("06. volume", raw.volume)?.as_str())?,
        timestamp: require("07. latest trading day", raw.latest_trading_day)?,
    })
}

/// Maps a date-keyed daily series into bars sorted newest first.
///
/// Keys that name the same calendar day (`2024-1-5`, `2024-01-05`) collapse
/// into one bar, so dates in the output are unique.
pub fn transform_daily_series(series: Map<String, Value>) -> Outcome<Vec<Bar>> {
    let mut bars = Vec::with_capacity(series.len());

    for (date, fields) in series {
        let date = TradingDate::parse(&date).map_err(|error| GatewayError::malformed(error.to_string()))?;
        let Value::Object(fields) = fields else {
            return Err(GatewayError::malformed(format!("series entry {date} is not an object")));
        };
        let raw: DailyBarPayload = decode("Time Series (Daily)", fields)?;

        let bar = Bar::new(
            date,
            parse_price("1. open", require("1. open", raw.open)?.as_str())?,
            parse_price("2. high", require("2. high", raw.high)?.as_str())?,
            parse_price("3. low", require("3. low", raw.low)?.as_str())?,
            parse_price("4. close", require("4. close", raw.close)?.as_str())?,
            parse_volume("5. volume", require("5. volume", raw.volume)?.as_str())?,
        )
        .map_err(|error| GatewayError::malformed(error.to_string()))?;
        bars.push(bar);
    }

    bars.sort_by(|left, right| right.date.cmp(&left.date));
    let before = bars.len();
    bars.dedup_by_key(|bar| bar.date);
    if bars.len() != before {
        tracing::warn!(
            dropped = before - bars.len(),
            "daily series contained duplicate calendar dates"
        );
    }

    Ok(bars)
}

/// Reads the symbol and refresh date from a `"Meta Data"` object.
pub fn transform_series_meta(meta: Option<Value>) -> Outcome<SeriesMeta> {
    let Some(Value::Object(meta)) = meta else {
        return Err(GatewayError::malformed("response has no Meta Data object"));
    };
    let raw: SeriesMetaPayload = decode("Meta Data", meta)?;

    Ok(SeriesMeta {
        symbol: require("2. Symbol", raw.symbol)?,
        last_refreshed: require("3. Last Refreshed", raw.last_refreshed)?,
    })
}

fn decode<T: DeserializeOwned>(block: &str, object: Map<String, Value>) -> Outcome<T> {
    serde_json::from_value(Value::Object(object))
        .map_err(|error| GatewayError::malformed(format!("unexpected {block} shape: {error}")))
}

fn require(field: &str, value: Option<String>) -> Outcome<String> {
    value.ok_or_else(|| GatewayError::malformed(format!("missing field '{field}'")))
}

fn parse_price(field: &str, raw: &str) -> Outcome<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| GatewayError::malformed(format!("field '{field}' is not a number: '{raw}'")))?;
    if !value.is_finite() {
        return Err(GatewayError::malformed(format!("field '{field}' must be finite")));
    }
    Ok(value)
}

fn parse_percent(raw: &str) -> Outcome<f64> {
    let trimmed = raw.trim();
    parse_price(
        "10. change percent",
        trimmed.strip_suffix('%').unwrap_or(trimmed),
    )
}

fn parse_volume(field: &str, raw: &str) -> Outcome<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        GatewayError::malformed(format!("field '{field}' is not a non-negative integer: '{raw}'"))
    })
}
