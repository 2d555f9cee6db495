//! Test Helper Utilities
//!
//! Shared utilities for testing songid-gw

#![allow(dead_code)]

pub mod multipart;
pub mod stub_provider;

pub use multipart::{multipart_request, MultipartFile, BOUNDARY};
pub use stub_provider::{CapturedRequest, StubProvider};

use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use songid_common::config::ProviderConfig;
use songid_gw::config::GatewayConfig;

pub const TEST_ACCESS_KEY: &str = "test-access-key";
pub const TEST_ACCESS_SECRET: &str = "test-access-secret";

/// Gateway config with credentials, pointed at `base_url`
pub fn config_with_credentials(base_url: &str) -> GatewayConfig {
    GatewayConfig {
        provider: ProviderConfig {
            base_url: base_url.to_string(),
            access_key: Some(TEST_ACCESS_KEY.to_string()),
            access_secret: Some(TEST_ACCESS_SECRET.to_string()),
            timeout_secs: 5,
            ..ProviderConfig::default()
        },
        ..GatewayConfig::default()
    }
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
