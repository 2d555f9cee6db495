//! Provider reply normalization
//!
//! Maps the provider's JSON envelope onto the closed [`IdentifyOutcome`] set.
//!
//! **Decision order:**
//! 1. `status.code == 0` with a non-empty `metadata.music` list → `Success`
//! 2. `status.code == 1001` → `NotFound`
//! 3. `status.code == 3001` → `InvalidCredentials`
//! 4. `status.code == 3003` → `RateLimited`
//! 5. anything else → `UnknownFormat` carrying the reply
//!
//! Only the first (top-ranked) candidate is ever consulted. Every field lookup
//! is an `Option` chain with its default applied last, so a reply missing any
//! nested object degrades to placeholders instead of failing.

use serde_json::Value;

use crate::models::{IdentifyOutcome, SongResult};

/// Provider status: match found
pub const CODE_SUCCESS: i64 = 0;
/// Provider status: no result
pub const CODE_NO_RESULT: i64 = 1001;
/// Provider status: invalid access key or signature
pub const CODE_INVALID_ACCESS_KEY: i64 = 3001;
/// Provider status: request limit exceeded
pub const CODE_LIMIT_EXCEEDED: i64 = 3003;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Used when the score is absent, non-numeric, or rounds to zero
pub const DEFAULT_CONFIDENCE_PERCENT: u8 = 95;

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Normalize a provider reply
///
/// Pure: the reply is only read, and calling this twice on the same reply
/// yields equal outcomes.
pub fn normalize(reply: &Value) -> IdentifyOutcome {
    let code = status_code(reply);

    if code == Some(CODE_SUCCESS) {
        if let Some(top_match) = first_match(reply) {
            return IdentifyOutcome::Success(extract_song(top_match));
        }
    }

    match code {
        Some(CODE_NO_RESULT) => IdentifyOutcome::NotFound,
        Some(CODE_INVALID_ACCESS_KEY) => IdentifyOutcome::InvalidCredentials,
        Some(CODE_LIMIT_EXCEEDED) => IdentifyOutcome::RateLimited,
        _ => IdentifyOutcome::UnknownFormat(reply.clone()),
    }
}

/// `status.code` as an integer, if present
pub fn status_code(reply: &Value) -> Option<i64> {
    reply.get("status")?.get("code")?.as_i64()
}

fn first_match(reply: &Value) -> Option<&Value> {
    reply.get("metadata")?.get("music")?.as_array()?.first()
}

/// Flatten one music entry into a [`SongResult`]
pub fn extract_song(music: &Value) -> SongResult {
    let external = music.get("external_metadata");

    SongResult {
        title: string_at(Some(music), &["title"]).unwrap_or(UNKNOWN_TITLE).to_string(),
        artist: first_artist(music).unwrap_or(UNKNOWN_ARTIST).to_string(),
        album: string_at(Some(music), &["album", "name"])
            .unwrap_or(UNKNOWN_ALBUM)
            .to_string(),
        release_year: release_year(music).unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
        confidence_percent: confidence_percent(music.get("score")),
        duration_seconds: duration_seconds(music.get("duration_ms")),
        spotify_url: string_at(external, &["spotify", "track", "external_urls", "spotify"])
            .map(str::to_string),
        youtube_url: string_at(external, &["youtube", "vid"])
            .map(|vid| format!("{}{}", YOUTUBE_WATCH_URL, vid)),
        apple_music_url: string_at(external, &["apple_music", "url"]).map(str::to_string),
        cover_art_url: cover_art_url(external),
        preview_url: string_at(external, &["spotify", "track", "preview_url"])
            .map(str::to_string),
    }
}

/// Walk object keys from `root`; empty strings count as absent
fn string_at<'a>(root: Option<&'a Value>, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(root?, |node, key| node.get(*key))?
        .as_str()
        .filter(|s| !s.is_empty())
}

fn first_artist(music: &Value) -> Option<&str> {
    let artist = music.get("artists")?.as_array()?.first();
    string_at(artist, &["name"])
}

fn release_year(music: &Value) -> Option<String> {
    string_at(Some(music), &["release_date"]).map(|date| date.chars().take(4).collect())
}

fn cover_art_url(external: Option<&Value>) -> Option<String> {
    let image = external?
        .get("spotify")?
        .get("album")?
        .get("images")?
        .as_array()?
        .first();
    string_at(image, &["url"]).map(str::to_string)
}

/// `round(score * 100)`, clamped to 0-100
///
/// An absent or non-numeric score, and a score that rounds to zero, all fall
/// back to [`DEFAULT_CONFIDENCE_PERCENT`].
fn confidence_percent(score: Option<&Value>) -> u8 {
    let percent = match score.and_then(Value::as_f64) {
        Some(score) => (score * 100.0).round(),
        None => return DEFAULT_CONFIDENCE_PERCENT,
    };

    if !percent.is_finite() || percent == 0.0 {
        return DEFAULT_CONFIDENCE_PERCENT;
    }

    percent.clamp(0.0, 100.0) as u8
}

/// `floor(duration_ms / 1000)` for non-negative numeric durations
fn duration_seconds(duration_ms: Option<&Value>) -> Option<u64> {
    let duration_ms = duration_ms?;

    if let Some(ms) = duration_ms.as_u64() {
        return Some(ms / 1000);
    }

    duration_ms
        .as_f64()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| (ms / 1000.0).floor() as u64)
}
