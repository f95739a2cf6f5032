use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::classify::classify;
use crate::data_source::{MarketDataSource, OutcomeFuture};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::transform::{transform_daily_series, transform_quote, transform_series_meta};
use crate::{GatewayError, HistoryResult, MarketRequest, Outcome, QuoteRecord};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

const QUOTE_KEY: &str = "Global Quote";
const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
const META_KEY: &str = "Meta Data";

/// Alpha Vantage gateway for the global quote and compact daily series.
#[derive(Clone)]
pub struct AlphaVantageGateway {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for AlphaVantageGateway {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl AlphaVantageGateway {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Transport timeout. Unset means the call waits as long as the transport allows.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn fetch_quote(&self, symbol: &str, api_key: &str) -> Outcome<QuoteRecord> {
        let request = MarketRequest::parse(symbol, api_key)?;
        let mut payload = self.call("GLOBAL_QUOTE", &request, &[]).await?;

        let quote = match payload.remove(QUOTE_KEY) {
            Some(Value::Object(quote)) if !quote.is_empty() => quote,
            _ => {
                tracing::warn!(symbol = %request.symbol, "quote response carried no quote data");
                return Err(GatewayError::not_found());
            }
        };

        transform_quote(quote).inspect_err(|error| {
            tracing::warn!(symbol = %request.symbol, %error, "quote payload did not match the expected shape");
        })
    }

    pub async fn fetch_history(&self, symbol: &str, api_key: &str) -> Outcome<HistoryResult> {
        let request = MarketRequest::parse(symbol, api_key)?;
        // The free tier only serves the latest 100 trading days; ask for exactly that.
        let mut payload = self
            .call("TIME_SERIES_DAILY", &request, &[("outputsize", "compact")])
            .await?;

        let series = match payload.remove(DAILY_SERIES_KEY) {
            Some(Value::Object(series)) if !series.is_empty() => series,
            _ => {
                tracing::warn!(symbol = %request.symbol, "history response carried no daily series");
                return Err(GatewayError::not_found());
            }
        };

        let bars = transform_daily_series(series)?;
        let meta = transform_series_meta(payload.remove(META_KEY)).inspect_err(|error| {
            tracing::warn!(symbol = %request.symbol, %error, "history metadata incomplete");
        })?;

        tracing::debug!(symbol = %meta.symbol, bars = bars.len(), "history normalized");
        Ok(HistoryResult {
            symbol: meta.symbol,
            bars,
            last_refreshed: meta.last_refreshed,
        })
    }

    /// Issues one upstream call and returns the decoded body once it is known
    /// to carry no error or throttle signal.
    async fn call(
        &self,
        function: &'static str,
        request: &MarketRequest,
        extra: &[(&str, &str)],
    ) -> Outcome<Map<String, Value>> {
        let mut http_request = HttpRequest::get(format!("{}/query", self.base_url))
            .with_query("function", function)
            .with_query("symbol", request.symbol.as_str());
        for (name, value) in extra {
            http_request = http_request.with_query(*name, *value);
        }
        let http_request = http_request
            .with_query("apikey", request.api_key.expose())
            .with_timeout(self.timeout);

        tracing::debug!(function, symbol = %request.symbol, "calling upstream");
        let response = self.http_client.execute(http_request).await.map_err(|error| {
            tracing::warn!(function, symbol = %request.symbol, error = error.message(), "upstream transport failed");
            GatewayError::upstream_unavailable(format!("transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            tracing::warn!(function, symbol = %request.symbol, status = response.status, "upstream returned non-success status");
            return Err(GatewayError::upstream_unavailable(format!(
                "upstream returned status {}",
                response.status
            )));
        }

        let payload: Value = serde_json::from_str(&response.body)
            .map_err(|error| GatewayError::malformed(format!("response is not JSON: {error}")))?;

        if let Some(signal) = classify(&payload) {
            tracing::warn!(function, symbol = %request.symbol, signal = signal.key(), "upstream signalled a non-data response");
            return Err(signal.into_error());
        }

        match payload {
            Value::Object(object) => Ok(object),
            _ => Err(GatewayError::malformed("response is not a JSON object")),
        }
    }
}

impl MarketDataSource for AlphaVantageGateway {
    fn quote<'a>(&'a self, symbol: &'a str, api_key: &'a str) -> OutcomeFuture<'a, QuoteRecord> {
        Box::pin(self.fetch_quote(symbol, api_key))
    }

    fn history<'a>(
        &'a self,
        symbol: &'a str,
        api_key: &'a str,
    ) -> OutcomeFuture<'a, HistoryResult> {
        Box::pin(self.fetch_history(symbol, api_key))
    }
}
