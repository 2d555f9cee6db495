//! # songid Common Library
//!
//! Shared code for the songid gateway including:
//! - Error types
//! - TOML configuration model and loading
//! - Provider request signing
//! - Graceful shutdown signals

pub mod config;
pub mod error;
pub mod shutdown;
pub mod signing;

pub use error::{Error, Result};
pub use signing::{ProviderCredentials, RequestSigner, Signature, SignedFields};
