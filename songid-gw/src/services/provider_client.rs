//! Identification provider HTTP client
//!
//! Sends one signed multipart request per sample. No retries and no rate
//! limiting; failures are surfaced to the caller as-is.
//!
//! **Outbound form fields:**
//! - `sample`: the audio bytes (file part)
//! - `sample_bytes`: byte length, decimal
//! - `access_key`, `data_type`, `signature_version`
//! - `signature`, `timestamp`: from one signing call

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use songid_common::config::ProviderConfig;
use songid_common::signing::{RequestSigner, SignedFields, DATA_TYPE, SIGNATURE_VERSION};
use songid_common::ProviderCredentials;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::models::AudioSample;

const USER_AGENT: &str = concat!("songid-gw/", env!("CARGO_PKG_VERSION"));

/// Provider client errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Could not reach the provider (DNS, connect, timeout, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// Provider answered with a non-2xx HTTP status
    #[error("Provider rejected request with HTTP {status}")]
    Rejected { status: u16, payload: Value },

    /// 2xx reply whose body is not JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built
    #[error("Client error: {0}")]
    Client(String),
}

/// Provider API client
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
}

impl ProviderClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint_path: config.endpoint_path.clone(),
        })
    }

    /// Full identify URL
    pub fn identify_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint_path)
    }

    /// Submit a sample and return the provider's raw JSON reply
    ///
    /// The timestamp is captured once and used for both the signature and the
    /// `timestamp` field.
    pub async fn identify(
        &self,
        credentials: &ProviderCredentials,
        sample: AudioSample,
    ) -> Result<Value, ProviderError> {
        let signer = RequestSigner::new(credentials.clone(), self.endpoint_path.clone());
        let signed = signer.sign_now();
        let sample_bytes = sample.len();

        let form = build_form(credentials, &signed, sample)?;

        tracing::debug!(
            sample_bytes,
            timestamp = signed.timestamp_seconds,
            url = %self.identify_url(),
            "Querying identification provider"
        );

        let started = Instant::now();
        let response = self
            .http_client
            .post(self.identify_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Provider responded"
        );

        if !status.is_success() {
            let payload = serde_json::from_str(&body).unwrap_or(Value::String(body));
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                payload,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

/// Assemble the multipart body
fn build_form(
    credentials: &ProviderCredentials,
    signed: &SignedFields,
    sample: AudioSample,
) -> Result<Form, ProviderError> {
    let sample_bytes = sample.len().to_string();
    let part = Part::bytes(sample.bytes)
        .file_name(sample.file_name)
        .mime_str(&sample.mime_type)
        .map_err(|e| ProviderError::Client(format!("Invalid MIME type: {}", e)))?;

    Ok(Form::new()
        .part("sample", part)
        .text("sample_bytes", sample_bytes)
        .text("access_key", credentials.access_key().to_string())
        .text("data_type", DATA_TYPE)
        .text("signature_version", SIGNATURE_VERSION)
        .text("signature", signed.signature.to_string())
        .text("timestamp", signed.timestamp_seconds.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ProviderClient::new(&ProviderConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_identify_url_joins_base_and_path() {
        let config = ProviderConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            ..ProviderConfig::default()
        };
        let client = ProviderClient::new(&config).unwrap();
        assert_eq!(client.identify_url(), "http://127.0.0.1:9000/v1/identify");
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let creds = ProviderCredentials::new("key", "secret").unwrap();
        let signer = RequestSigner::new(creds.clone(), "/v1/identify");
        let sample = AudioSample::new(vec![1, 2, 3], "clip.mp3", "not a mime type");

        let result = build_form(&creds, &signer.sign_at(1_700_000_000), sample);
        assert!(matches!(result, Err(ProviderError::Client(_))));
    }
}
