//! Configuration resolution for songid-gw
//!
//! Provider settings are resolved with ENV → TOML priority. The result is an
//! explicit [`GatewayConfig`] value handed to [`crate::AppState`]; request
//! handling never reads the environment.

use songid_common::config::{CorsConfig, ProviderConfig, TomlConfig, UploadConfig};
use songid_common::{ProviderCredentials, Result};
use tracing::{info, warn};

/// Environment variable holding the provider access key
pub const ENV_ACCESS_KEY: &str = "SONGID_ACCESS_KEY";
/// Environment variable holding the provider shared secret
pub const ENV_ACCESS_SECRET: &str = "SONGID_ACCESS_SECRET";
/// Environment variable overriding the provider base URL
pub const ENV_PROVIDER_URL: &str = "SONGID_PROVIDER_URL";

/// Fully resolved gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderConfig,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
}

impl GatewayConfig {
    /// Resolve provider settings from the environment and the TOML file
    ///
    /// Missing credentials are not an error here: the gateway still starts,
    /// reports them on the health endpoint, and refuses identify requests.
    pub fn resolve(toml_config: TomlConfig) -> Self {
        let mut provider = toml_config.provider;

        provider.access_key = resolve_setting(
            "access key",
            ENV_ACCESS_KEY,
            provider.access_key.as_deref(),
        );
        provider.access_secret = resolve_setting(
            "access secret",
            ENV_ACCESS_SECRET,
            provider.access_secret.as_deref(),
        );

        if let Some(url) = std::env::var(ENV_PROVIDER_URL).ok().filter(|u| is_valid_key(u)) {
            info!("Provider base URL loaded from environment variable");
            provider.base_url = url;
        }

        let config = Self {
            host: toml_config.server.host,
            port: toml_config.server.port,
            provider,
            upload: toml_config.upload,
            cors: toml_config.cors,
        };

        if !config.credentials_configured() {
            warn!(
                "Provider credentials not configured. Set {} and {} or add \
                 access_key/access_secret under [provider] in the TOML config",
                ENV_ACCESS_KEY, ENV_ACCESS_SECRET
            );
        }

        config
    }

    /// Credentials for signing, or `MissingCredentials`
    pub fn credentials(&self) -> Result<ProviderCredentials> {
        ProviderCredentials::from_parts(
            self.provider.access_key.as_deref(),
            self.provider.access_secret.as_deref(),
        )
    }

    /// Whether both credential values are present
    pub fn credentials_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let toml_config = TomlConfig::default();
        Self {
            host: toml_config.server.host,
            port: toml_config.server.port,
            provider: toml_config.provider,
            upload: toml_config.upload,
            cors: toml_config.cors,
        }
    }
}

/// Resolve one setting, environment first
fn resolve_setting(label: &str, env_name: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_name).ok().filter(|v| is_valid_key(v));
    let toml_value = toml_value.filter(|v| is_valid_key(v));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "Provider {} found in multiple sources: environment, TOML. Using environment (highest priority).",
            label
        );
    }

    if let Some(value) = env_value {
        info!(len = value.len(), "Provider {} loaded from environment variable", label);
        return Some(value);
    }

    if let Some(value) = toml_value {
        info!(len = value.len(), "Provider {} loaded from TOML config", label);
        return Some(value.to_string());
    }

    None
}

/// Validate a setting value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
