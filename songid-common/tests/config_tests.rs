//! Unit tests for configuration file loading
//!
//! Tests:
//! - Missing TOML files fall back to compiled defaults
//! - Present TOML files are parsed, with absent sections defaulted
//! - Malformed TOML files are reported as configuration errors

use songid_common::config::{
    load_or_default, load_toml_config, TomlConfig, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
};
use songid_common::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let config = load_or_default(&path).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_full_file_is_parsed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("songid-gw.toml");
    fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[provider]
base_url = "https://identify-us-west-2.acrcloud.com"
access_key = "key-from-toml"
access_secret = "secret-from-toml"
timeout_secs = 10

[upload]
field_name = "sample"
max_bytes = 2048

[cors]
allowed_origins = ["http://localhost:3000"]
"#,
    )
    .unwrap();

    let config = load_or_default(&path).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.provider.base_url, "https://identify-us-west-2.acrcloud.com");
    assert_eq!(config.provider.endpoint_path, "/v1/identify");
    assert_eq!(config.provider.access_key.as_deref(), Some("key-from-toml"));
    assert_eq!(config.provider.access_secret.as_deref(), Some("secret-from-toml"));
    assert_eq!(config.provider.timeout_secs, 10);
    assert_eq!(config.upload.field_name, "sample");
    assert_eq!(config.upload.max_bytes, 2048);
    assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
}

#[test]
fn test_empty_file_is_all_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[provider\naccess_key = ").unwrap();

    let result = load_or_default(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}
