//! Gateway contract and its closed failure taxonomy.
//!
//! Every gateway call resolves to an [`Outcome`]: either the canonical record
//! or a [`GatewayError`] whose [`GatewayErrorKind`] is one of a fixed set.
//!
//! | Kind | Meaning | HTTP |
//! |------|---------|------|
//! | `Invalid` | caller supplied an empty symbol or key | 400 |
//! | `NotFound` | upstream returned no quote / no series | 404 |
//! | `ProviderRejected` | upstream flagged the symbol as invalid | 404 |
//! | `RateLimited` | upstream call-limit or per-second notice | 429 |
//! | `UpstreamUnavailable` | transport failure or non-2xx status | 500 |
//! | `Malformed` | 2xx body missing the expected shape | 500 |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{HistoryResult, QuoteRecord, ValidationError};

/// Result of one gateway call.
pub type Outcome<T> = Result<T, GatewayError>;

/// Boxed future returned by [`MarketDataSource`] methods.
pub type OutcomeFuture<'a, T> = Pin<Box<dyn Future<Output = Outcome<T>> + Send + 'a>>;

/// Gateway-level failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    Invalid,
    NotFound,
    ProviderRejected,
    RateLimited,
    UpstreamUnavailable,
    Malformed,
}

impl GatewayErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Invalid => "gateway.invalid",
            Self::NotFound => "gateway.not_found",
            Self::ProviderRejected => "gateway.provider_rejected",
            Self::RateLimited => "gateway.rate_limited",
            Self::UpstreamUnavailable => "gateway.upstream_unavailable",
            Self::Malformed => "gateway.malformed",
        }
    }
}

impl Display for GatewayErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured gateway error.
///
/// `message` is safe to show to end users, `message_key` selects a translated
/// variant of it, and `detail` carries diagnostics for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    kind: GatewayErrorKind,
    message: String,
    message_key: &'static str,
    detail: Option<String>,
}

impl GatewayError {
    fn new(kind: GatewayErrorKind, message_key: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            message_key,
            detail: None,
        }
    }

    pub fn missing_symbol() -> Self {
        Self::new(
            GatewayErrorKind::Invalid,
            "errorMissingSymbol",
            "symbol is required",
        )
    }

    pub fn missing_api_key() -> Self {
        Self::new(
            GatewayErrorKind::Invalid,
            "errorMissingApiKey",
            "api key is required",
        )
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Invalid, "errorInvalidRequest", message)
    }

    pub fn not_found() -> Self {
        Self::new(
            GatewayErrorKind::NotFound,
            "errorNotFound",
            "no stock data found for this symbol",
        )
    }

    pub fn provider_rejected() -> Self {
        Self::new(
            GatewayErrorKind::ProviderRejected,
            "errorInvalidSymbol",
            "invalid symbol",
        )
    }

    /// Call-limit notice (`Note` signal).
    pub fn rate_limited_calls() -> Self {
        Self::new(
            GatewayErrorKind::RateLimited,
            "errorRateLimitCalls",
            "API call limit reached; wait a moment and try again",
        )
    }

    /// Per-second throttle notice (`Information` signal).
    pub fn rate_limited_per_second() -> Self {
        Self::new(
            GatewayErrorKind::RateLimited,
            "errorRateLimitPerSecond",
            "API rate limit reached (1 request per second); wait a moment and try again",
        )
    }

    pub fn upstream_unavailable(detail: impl Into<String>) -> Self {
        Self::new(
            GatewayErrorKind::UpstreamUnavailable,
            "errorUpstream",
            "failed to fetch stock data",
        )
        .with_detail(detail)
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(
            GatewayErrorKind::Malformed,
            "errorMalformed",
            "unexpected response from the market data provider",
        )
        .with_detail(detail)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub const fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn message_key(&self) -> &'static str {
        self.message_key
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether waiting could change the result. Informational; the gateway never retries.
    pub const fn retryable(&self) -> bool {
        matches!(
            self.kind,
            GatewayErrorKind::RateLimited | GatewayErrorKind::UpstreamUnavailable
        )
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayError {}

impl From<ValidationError> for GatewayError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::EmptySymbol => Self::missing_symbol(),
            ValidationError::EmptyApiKey => Self::missing_api_key(),
            other => Self::invalid(other.to_string()),
        }
    }
}

/// Market data gateway contract.
///
/// Both calls validate their inputs before any network access and never
/// panic; every failure is returned as a [`GatewayError`].
pub trait MarketDataSource: Send + Sync {
    /// Fetches the current quote for `symbol`.
    fn quote<'a>(&'a self, symbol: &'a str, api_key: &'a str) -> OutcomeFuture<'a, QuoteRecord>;

    /// Fetches the compact daily series for `symbol`, newest bar first.
    fn history<'a>(
        &'a self,
        symbol: &'a str,
        api_key: &'a str,
    ) -> OutcomeFuture<'a, HistoryResult>;
}
