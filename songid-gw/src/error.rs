//! Error types for songid-gw
//!
//! Every error renders as `{"success": false, "error": "..."}` plus optional
//! diagnostic fields, matching the shape of non-success identify outcomes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ProviderError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload is not an audio file (415)
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Upload exceeds the configured size limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Provider credentials are not configured (500); the provider is never called
    #[error("Provider credentials are not configured")]
    MissingCredentials,

    /// Provider call failed (502)
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "Identification service credentials are not configured",
                }),
            ),
            ApiError::Provider(ProviderError::Rejected { status, payload }) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "success": false,
                    "error": "Identification provider rejected the request",
                    "status": status,
                    "details": payload,
                }),
            ),
            ApiError::Provider(ProviderError::Parse(msg)) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "success": false,
                    "error": "Identification provider returned an unreadable response",
                    "details": msg,
                }),
            ),
            ApiError::Provider(ref err) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "success": false,
                    "error": "Failed to reach identification provider",
                    "details": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
