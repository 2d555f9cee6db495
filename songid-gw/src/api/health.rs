//! Health check endpoint
//!
//! Reports uptime and whether provider credentials are configured. Never
//! signs or contacts the provider.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::build_info::{BuildInfo, BUILD_INFO};
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok", or "degraded" when credentials are missing)
    pub status: String,
    /// Module name ("songid-gw")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Source revision and build time of the running binary
    pub build: BuildInfo,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Both access key and secret are present
    pub credentials_configured: bool,
    /// Last error message if any (for diagnostics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let credentials_configured = state.config.credentials_configured();
    let last_error = state.last_error.read().await.clone();

    Json(HealthResponse {
        status: if credentials_configured { "ok" } else { "degraded" }.to_string(),
        module: "songid-gw".to_string(),
        version: BUILD_INFO.version.to_string(),
        build: BUILD_INFO,
        uptime_seconds,
        credentials_configured,
        last_error,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
}
