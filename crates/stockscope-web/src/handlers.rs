//! Route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use stockscope_core::{HistoryResult, Language, QuoteRecord};

use crate::error::ApiError;
use crate::AppState;

/// Query string shared by the market endpoints.
///
/// Missing parameters are passed through as empty strings so the gateway
/// reports them with its own validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuery {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// `ja` or `en`; selects the language of error messages.
    #[serde(default)]
    pub lang: Option<String>,
}

impl MarketQuery {
    fn language(&self, fallback: Language) -> Language {
        self.lang
            .as_deref()
            .and_then(|lang| lang.parse().ok())
            .unwrap_or(fallback)
    }
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<QuoteRecord>, ApiError> {
    let language = query.language(state.default_language);
    let symbol = query.symbol.as_deref().unwrap_or_default();
    let api_key = query.api_key.as_deref().unwrap_or_default();

    state
        .gateway
        .quote(symbol, api_key)
        .await
        .map(Json)
        .map_err(|error| ApiError::from_gateway(&error, language))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<HistoryResult>, ApiError> {
    let language = query.language(state.default_language);
    let symbol = query.symbol.as_deref().unwrap_or_default();
    let api_key = query.api_key.as_deref().unwrap_or_default();

    let history = state
        .gateway
        .history(symbol, api_key)
        .await
        .map_err(|error| ApiError::from_gateway(&error, language))?;
    tracing::debug!(symbol = %history.symbol, bars = history.bars.len(), "history served");
    Ok(Json(history))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
