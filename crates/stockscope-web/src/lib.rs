//! # Stockscope Web
//!
//! JSON API over the stockscope gateway.
//!
//! | Route | Success | Failure |
//! |-------|---------|---------|
//! | `GET /api/quote?symbol=&apiKey=` | `200` quote record | `400` `404` `429` `500` |
//! | `GET /api/history?symbol=&apiKey=` | `200` daily history, newest first | `400` `404` `429` `500` |
//! | `GET /healthz` | `200 {"status":"ok"}` | |
//!
//! Error bodies are `{"error": <message>, "code": <stable code>}`. Every call
//! goes upstream; nothing is cached.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{body::Body, http::Method, http::Request, routing::get, Router};
use stockscope_core::{Language, MarketDataSource};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};

pub struct AppState {
    pub gateway: Arc<dyn MarketDataSource>,
    /// Language of error messages when the request does not ask for one.
    pub default_language: Language,
}

impl AppState {
    pub fn new(gateway: Arc<dyn MarketDataSource>) -> Self {
        Self {
            gateway,
            default_language: Language::Ja,
        }
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    // The span records the path only; the query string carries the api key.
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Router::new()
        .route("/api/quote", get(handlers::quote))
        .route("/api/history", get(handlers::history))
        .route("/healthz", get(handlers::healthz))
        .layer(trace)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_origin(Any),
        )
        .with_state(Arc::new(state))
}
