//! Normalized identification outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flattened metadata of the top-ranked match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongResult {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// First four characters of the provider's release date
    pub release_year: String,
    /// 0-100
    pub confidence_percent: u8,
    pub duration_seconds: Option<u64>,
    pub spotify_url: Option<String>,
    pub youtube_url: Option<String>,
    pub apple_music_url: Option<String>,
    pub cover_art_url: Option<String>,
    pub preview_url: Option<String>,
}

/// Result of one identification attempt
///
/// Exactly one variant is produced per provider reply.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifyOutcome {
    /// Provider matched the sample
    Success(SongResult),
    /// Provider found no match (code 1001)
    NotFound,
    /// Provider rejected the access key or signature (code 3001)
    InvalidCredentials,
    /// Provider quota exceeded (code 3003)
    RateLimited,
    /// Reply did not match any known shape; carries the reply unchanged
    UnknownFormat(Value),
}

impl IdentifyOutcome {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            IdentifyOutcome::Success(_) => "success",
            IdentifyOutcome::NotFound => "not_found",
            IdentifyOutcome::InvalidCredentials => "invalid_credentials",
            IdentifyOutcome::RateLimited => "rate_limited",
            IdentifyOutcome::UnknownFormat(_) => "unknown_format",
        }
    }
}
