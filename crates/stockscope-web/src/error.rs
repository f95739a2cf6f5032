//! JSON error responses for the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stockscope_core::{BuiltinCatalog, GatewayError, GatewayErrorKind, Language, MessageCatalog};

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Builds the response for `error` with the message translated into `language`.
    pub fn from_gateway(error: &GatewayError, language: Language) -> Self {
        let status = status_for(error.kind());
        if status.is_server_error() {
            tracing::error!(%error, "request failed upstream");
        } else {
            tracing::info!(code = error.code(), "request rejected");
        }

        Self {
            status,
            body: ErrorBody {
                error: BuiltinCatalog.text(language, error.message_key()),
                code: error.code(),
            },
        }
    }
}

pub const fn status_for(kind: GatewayErrorKind) -> StatusCode {
    match kind {
        GatewayErrorKind::Invalid => StatusCode::BAD_REQUEST,
        GatewayErrorKind::NotFound | GatewayErrorKind::ProviderRejected => StatusCode::NOT_FOUND,
        GatewayErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        GatewayErrorKind::UpstreamUnavailable | GatewayErrorKind::Malformed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
