//! Song identification endpoint
//!
//! POST /api/identify accepts a multipart upload with one audio file, forwards
//! it to the provider as a signed request and answers with a normalized
//! outcome.
//!
//! **Response shape:**
//! - success: `{"success": true, "song": {...}}`
//! - otherwise: `{"success": false, "error": "...", "code"?: n, "raw"?: {...}}`

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use songid_common::config::UploadConfig;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{AudioSample, IdentifyOutcome};
use crate::services::normalizer::{
    self, CODE_INVALID_ACCESS_KEY, CODE_LIMIT_EXCEEDED, CODE_NO_RESULT,
};
use crate::{ApiError, ApiResult, AppState};

const FALLBACK_MIME: &str = "application/octet-stream";

/// POST /api/identify handler
///
/// **Behavior:**
/// 1. Refuse immediately (500) when credentials are not configured
/// 2. Read the configured file field from the multipart body
/// 3. Sign and submit to the provider
/// 4. Normalize the reply and map it to an HTTP response
///
/// **Errors:**
/// - 400: no file field, or an empty file
/// - 413: file larger than the configured limit
/// - 415: file is not audio
/// - 502: provider unreachable or answered with a non-2xx status
pub async fn identify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();

    let credentials = state.config.credentials().map_err(|e| {
        warn!(%request_id, "Identify request refused: {}", e);
        ApiError::MissingCredentials
    })?;

    let sample = read_sample(&mut multipart, &state.config.upload).await?;

    info!(
        %request_id,
        file_name = %sample.file_name,
        mime_type = %sample.mime_type,
        size_bytes = sample.len(),
        "Received audio sample"
    );

    let reply = match state.provider.identify(&credentials, sample).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(%request_id, "Provider call failed: {}", e);
            state.record_error(e.to_string()).await;
            return Err(e.into());
        }
    };

    let outcome = normalizer::normalize(&reply);

    match &outcome {
        IdentifyOutcome::Success(song) => {
            info!(
                %request_id,
                title = %song.title,
                artist = %song.artist,
                confidence = song.confidence_percent,
                "Song identified"
            );
            state.clear_error().await;
        }
        IdentifyOutcome::NotFound => {
            info!(%request_id, outcome = outcome.kind(), "Identification finished");
            state.clear_error().await;
        }
        IdentifyOutcome::InvalidCredentials | IdentifyOutcome::RateLimited => {
            warn!(%request_id, outcome = outcome.kind(), "Provider refused the request");
            state
                .record_error(format!("Provider refused the request ({})", outcome.kind()))
                .await;
        }
        IdentifyOutcome::UnknownFormat(raw) => {
            warn!(%request_id, raw = %raw, "Unrecognized provider reply");
            state.record_error("Unrecognized provider reply").await;
        }
    }

    Ok(outcome_response(outcome))
}

/// Map an outcome onto status code and JSON body
pub fn outcome_response(outcome: IdentifyOutcome) -> Response {
    match outcome {
        IdentifyOutcome::Success(song) => (
            StatusCode::OK,
            Json(json!({ "success": true, "song": song })),
        )
            .into_response(),
        IdentifyOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "No matching song found",
                "code": CODE_NO_RESULT,
            })),
        )
            .into_response(),
        IdentifyOutcome::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": "Identification service rejected the configured credentials",
                "code": CODE_INVALID_ACCESS_KEY,
            })),
        )
            .into_response(),
        IdentifyOutcome::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "success": false,
                "error": "Identification rate limit exceeded, try again later",
                "code": CODE_LIMIT_EXCEEDED,
            })),
        )
            .into_response(),
        IdentifyOutcome::UnknownFormat(raw) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "success": false,
                "error": "Unexpected response from identification provider",
                "raw": raw,
            })),
        )
            .into_response(),
    }
}

/// Pull the configured file field out of the multipart body
///
/// Other fields are skipped.
async fn read_sample(multipart: &mut Multipart, upload: &UploadConfig) -> ApiResult<AudioSample> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(upload.field_name.as_str()) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("sample").to_string();
        let mime_type = field.content_type().unwrap_or(FALLBACK_MIME).to_string();

        if !is_accepted_mime(&mime_type) {
            return Err(ApiError::UnsupportedMediaType(format!(
                "Expected an audio file, got {}",
                mime_type
            )));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Uploaded audio file is empty".to_string()));
        }
        if bytes.len() > upload.max_bytes {
            return Err(ApiError::PayloadTooLarge(format!(
                "Audio file is {} bytes, limit is {} bytes",
                bytes.len(),
                upload.max_bytes
            )));
        }

        return Ok(AudioSample::new(bytes.to_vec(), file_name, mime_type));
    }

    Err(ApiError::BadRequest(format!(
        "No audio file uploaded (expected multipart field '{}')",
        upload.field_name
    )))
}

/// `audio/*`, or an untyped binary upload
fn is_accepted_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("audio/") || essence == FALLBACK_MIME
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Build identification routes
pub fn identify_routes() -> Router<AppState> {
    Router::new().route("/api/identify", post(identify))
}
