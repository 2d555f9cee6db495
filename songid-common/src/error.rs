//! Common error types for songid

use thiserror::Error;

/// Common result type for songid operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across songid crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider access key or shared secret is not configured
    #[error("Provider credentials are not configured (access key and secret are both required)")]
    MissingCredentials,
}
