//! Behavior-driven tests for the market data gateway
//!
//! These tests drive the Alpha Vantage gateway through a scripted transport and
//! check the typed outcome a caller receives for each upstream response shape.

use std::sync::Arc;

use serde_json::json;
use stockscope_core::{
    window_by_period, AlphaVantageGateway, ChartPeriod, GatewayErrorKind, MarketDataSource,
    ScriptedHttpClient, TradingDate,
};

fn gateway_answering(body: serde_json::Value) -> (AlphaVantageGateway, Arc<ScriptedHttpClient>) {
    let client = Arc::new(ScriptedHttpClient::always_json(body.to_string()));
    let gateway = AlphaVantageGateway::new(client.clone()).with_base_url("https://av.test");
    (gateway, client)
}

fn daily_entry(close: f64) -> serde_json::Value {
    json!({
        "1. open": format!("{:.4}", close - 0.5),
        "2. high": format!("{:.4}", close + 1.0),
        "3. low": format!("{:.4}", close - 1.0),
        "4. close": format!("{close:.4}"),
        "5. volume": "1200000"
    })
}

// =============================================================================
// Quote: good path
// =============================================================================

#[tokio::test]
async fn when_upstream_returns_a_quote_user_receives_parsed_numbers() {
    // Given: An upstream global quote for AAPL
    let (gateway, _) = gateway_answering(json!({
        "Global Quote": {
            "01. symbol": "AAPL",
            "03. high": "151.0000",
            "04. low": "149.5000",
            "05. price": "150.25",
            "06. volume": "1000",
            "07. latest trading day": "2024-05-01",
            "09. change": "-1.25",
            "10. change percent": "-0.82%"
        }
    }));

    // When: The quote is requested
    let quote = gateway.quote("AAPL", "k").await.expect("quote should parse");

    // Then: Prices and the stripped percentage come back as numbers
    assert_eq!(quote.symbol, "AAPL");
    assert_eq!(quote.price, 150.25);
    assert_eq!(quote.change, -1.25);
    assert_eq!(quote.change_percent, -0.82);
    assert_eq!(quote.volume, 1_000);
}

#[tokio::test]
async fn when_quote_block_is_empty_user_receives_not_found() {
    let (gateway, _) = gateway_answering(json!({ "Global Quote": {} }));

    let error = gateway.quote("ZZZZ", "k").await.expect_err("must fail");

    assert_eq!(error.kind(), GatewayErrorKind::NotFound);
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn when_upstream_sends_a_note_either_endpoint_reports_rate_limited() {
    // Given: An upstream that only answers with a call-limit note
    let (gateway, _) = gateway_answering(json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
    }));

    // When: Both endpoints are called
    let quote_error = gateway.quote("AAPL", "k").await.expect_err("must fail");
    let history_error = gateway.history("AAPL", "k").await.expect_err("must fail");

    // Then: Both are rate limited with the call-limit message
    assert_eq!(quote_error.kind(), GatewayErrorKind::RateLimited);
    assert_eq!(history_error.kind(), GatewayErrorKind::RateLimited);
    assert_eq!(quote_error.message_key(), "errorRateLimitCalls");
}

#[tokio::test]
async fn when_note_and_information_are_both_present_the_note_wins() {
    let (gateway, _) = gateway_answering(json!({
        "Information": "Please consider spreading out your free API requests more sparingly (1 request per second).",
        "Note": "API call frequency exceeded."
    }));

    let error = gateway.history("IBM", "k").await.expect_err("must fail");

    assert_eq!(error.message_key(), "errorRateLimitCalls");
}

#[tokio::test]
async fn when_information_is_the_only_signal_the_per_second_message_is_used() {
    let (gateway, _) = gateway_answering(json!({
        "Information": "Please consider spreading out your free API requests more sparingly (1 request per second)."
    }));

    let error = gateway.quote("IBM", "k").await.expect_err("must fail");

    assert_eq!(error.kind(), GatewayErrorKind::RateLimited);
    assert_eq!(error.message_key(), "errorRateLimitPerSecond");
}

#[tokio::test]
async fn when_error_message_is_present_lower_priority_keys_are_ignored() {
    let (gateway, _) = gateway_answering(json!({
        "Error Message": "Invalid API call. Please retry or visit the documentation.",
        "Note": "API call frequency exceeded.",
        "Information": "1 request per second."
    }));

    let error = gateway.history("NOPE", "k").await.expect_err("must fail");

    assert_eq!(error.kind(), GatewayErrorKind::ProviderRejected);
}

// =============================================================================
// Input validation
// =============================================================================

#[tokio::test]
async fn when_symbol_is_empty_no_upstream_call_is_made() {
    // Given: A gateway whose transport records every call
    let (gateway, client) = gateway_answering(json!({}));

    // When: Both endpoints are called with an empty or blank symbol
    let quote_error = gateway.quote("", "k").await.expect_err("must fail");
    let history_error = gateway.history("   ", "k").await.expect_err("must fail");

    // Then: Both fail as invalid before touching the network
    assert_eq!(quote_error.kind(), GatewayErrorKind::Invalid);
    assert_eq!(history_error.kind(), GatewayErrorKind::Invalid);
    assert_eq!(client.call_count(), 0);
}

// =============================================================================
// History: normalization and windowing
// =============================================================================

#[tokio::test]
async fn when_history_has_unique_dates_bars_come_back_strictly_descending() {
    // Given: Twelve distinct dates in arbitrary key order
    let mut series = serde_json::Map::new();
    for day in [7_u8, 1, 12, 3, 9, 2, 11, 5, 4, 10, 6, 8] {
        series.insert(format!("2024-03-{day:02}"), daily_entry(100.0 + f64::from(day)));
    }
    let (gateway, _) = gateway_answering(json!({
        "Meta Data": { "2. Symbol": "IBM", "3. Last Refreshed": "2024-03-12" },
        "Time Series (Daily)": series
    }));

    // When: History is requested
    let history = gateway.history("ibm", "k").await.expect("history should parse");

    // Then: Every bar is kept and dates strictly decrease
    assert_eq!(history.symbol, "IBM");
    assert_eq!(history.last_refreshed, "2024-03-12");
    assert_eq!(history.bars.len(), 12);
    assert!(history.bars.windows(2).all(|pair| pair[0].date > pair[1].date));
    assert_eq!(history.newest().map(|bar| bar.close), Some(112.0));
}

#[tokio::test]
async fn when_one_week_is_selected_only_recent_bars_are_charted_oldest_first() {
    // Given: Five bars, the newest three days before today
    let (gateway, _) = gateway_answering(json!({
        "Meta Data": { "2. Symbol": "MSFT", "3. Last Refreshed": "2024-06-14" },
        "Time Series (Daily)": {
            "2024-06-14": daily_entry(5.0),
            "2024-06-12": daily_entry(4.0),
            "2024-06-10": daily_entry(3.0),
            "2024-06-07": daily_entry(2.0),
            "2024-05-31": daily_entry(1.0)
        }
    }));
    let today = TradingDate::parse("2024-06-17").expect("date");

    // When: The history is windowed to one week
    let history = gateway.history("MSFT", "k").await.expect("history should parse");
    let windowed = window_by_period(&history.bars, "1W", today).expect("known period");

    // Then: Only bars on or after 2024-06-10 remain, ascending
    let dates = windowed.iter().map(|bar| bar.date.to_string()).collect::<Vec<_>>();
    assert_eq!(dates, vec!["2024-06-10", "2024-06-12", "2024-06-14"]);

    // And: Windowing the same input again gives the same answer
    assert_eq!(ChartPeriod::OneWeek.window(&history.bars, today), windowed);
}

#[tokio::test]
async fn when_meta_data_lacks_last_refreshed_history_is_malformed() {
    let (gateway, _) = gateway_answering(json!({
        "Meta Data": { "2. Symbol": "IBM" },
        "Time Series (Daily)": { "2024-03-01": daily_entry(1.0) }
    }));

    let error = gateway.history("IBM", "k").await.expect_err("must fail");

    assert_eq!(error.kind(), GatewayErrorKind::Malformed);
}

#[tokio::test]
async fn when_series_is_missing_history_is_not_found() {
    let (gateway, _) = gateway_answering(json!({
        "Meta Data": { "2. Symbol": "IBM", "3. Last Refreshed": "2024-03-01" }
    }));

    let error = gateway.history("IBM", "k").await.expect_err("must fail");

    assert_eq!(error.kind(), GatewayErrorKind::NotFound);
}
