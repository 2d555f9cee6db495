//! Configuration file model and loading
//!
//! Missing TOML files never stop startup: a warning is logged and compiled
//! defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default listen port
pub const DEFAULT_PORT: u16 = 5730;
/// Provider identify route
pub const DEFAULT_ENDPOINT_PATH: &str = "/v1/identify";
/// Provider base URL used when none is configured
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://identify-eu-west-1.acrcloud.com";
/// Outbound request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Multipart field carrying the uploaded sample
pub const DEFAULT_UPLOAD_FIELD: &str = "audio";
/// Upload size limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// `[provider]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub access_key: Option<String>,
    pub access_secret: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            access_key: None,
            access_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[upload]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub field_name: String,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// `[cors]` section; an empty origin list means permissive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Default configuration file location for the platform
///
/// `~/.config/songid/songid-gw.toml` on Linux, the equivalent per-user config
/// directory elsewhere, `./songid-gw.toml` when none can be determined.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("songid").join("songid-gw.toml"))
        .unwrap_or_else(|| PathBuf::from("songid-gw.toml"))
}

/// Parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when the file is missing
///
/// A file that exists but fails to parse is an error.
pub fn load_or_default(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let config = load_toml_config(path)
        .map_err(|e| Error::Config(format!("Failed to load {}: {}", path.display(), e)))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.provider.endpoint_path, "/v1/identify");
        assert_eq!(config.upload.field_name, "audio");
        assert!(config.provider.access_key.is_none());
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [provider]
            access_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.access_key.as_deref(), Some("abc"));
        assert_eq!(config.provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_default_config_path_file_name() {
        assert!(default_config_path().ends_with("songid-gw.toml"));
    }
}
