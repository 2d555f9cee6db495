//! Provider request signing
//!
//! Every identify request sent to the provider carries a timestamp (Unix
//! seconds) and a signature computed over a canonical string:
//!
//! ```text
//! StringToSign = HTTP-Method + "\n" +
//!                Endpoint-Path + "\n" +
//!                Access-Key + "\n" +
//!                Data-Type + "\n" +
//!                Signature-Version + "\n" +
//!                Timestamp
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(SharedSecret, StringToSign))`.
//!
//! # Pure Functions
//!
//! This module contains ONLY pure functions. No HTTP framework or client
//! dependencies; those live in the gateway crate.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// HTTP method used for every identify request
pub const HTTP_METHOD: &str = "POST";

/// Data type literal; only raw audio samples are submitted
pub const DATA_TYPE: &str = "audio";

/// Signature scheme version understood by the provider
pub const SIGNATURE_VERSION: &str = "1";

// ========================================
// Credentials
// ========================================

/// Access key id and shared secret issued by the provider
///
/// Can only be constructed from non-blank values, so a signer never sees an
/// empty key.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    access_key: String,
    access_secret: String,
}

impl ProviderCredentials {
    /// Build credentials, rejecting blank values with [`Error::MissingCredentials`]
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Result<Self> {
        let access_key = access_key.into();
        let access_secret = access_secret.into();

        if access_key.trim().is_empty() || access_secret.trim().is_empty() {
            return Err(Error::MissingCredentials);
        }

        Ok(Self {
            access_key,
            access_secret,
        })
    }

    /// Build credentials from optional configuration values
    pub fn from_parts(access_key: Option<&str>, access_secret: Option<&str>) -> Result<Self> {
        match (access_key, access_secret) {
            (Some(key), Some(secret)) => Self::new(key, secret),
            _ => Err(Error::MissingCredentials),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }
}

// Secrets stay out of logs and panic messages
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("access_key", &self.access_key)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

// ========================================
// Canonical String
// ========================================

/// Inputs of one signature
///
/// Method, data type and signature version are fixed literals; only the path,
/// key id and timestamp vary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest<'a> {
    pub endpoint_path: &'a str,
    pub access_key_id: &'a str,
    pub timestamp_seconds: i64,
}

impl<'a> SigningRequest<'a> {
    pub fn new(endpoint_path: &'a str, access_key_id: &'a str, timestamp_seconds: i64) -> Self {
        Self {
            endpoint_path,
            access_key_id,
            timestamp_seconds,
        }
    }

    pub fn http_method(&self) -> &'static str {
        HTTP_METHOD
    }

    pub fn data_type(&self) -> &'static str {
        DATA_TYPE
    }

    pub fn signature_version(&self) -> &'static str {
        SIGNATURE_VERSION
    }
}

/// Build the newline-joined string to sign
///
/// Field order is fixed: method, path, key id, data type, version, timestamp.
///
/// # Examples
///
/// ```
/// use songid_common::signing::{canonical_string, SigningRequest};
///
/// let request = SigningRequest::new("/v1/identify", "abc123", 1_700_000_000);
/// assert_eq!(
///     canonical_string(&request),
///     "POST\n/v1/identify\nabc123\naudio\n1\n1700000000"
/// );
/// ```
pub fn canonical_string(request: &SigningRequest<'_>) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.http_method(),
        request.endpoint_path,
        request.access_key_id,
        request.data_type(),
        request.signature_version(),
        request.timestamp_seconds
    )
}

// ========================================
// Signature
// ========================================

/// Base64-encoded HMAC-SHA1 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign a request for the given endpoint and timestamp
///
/// Deterministic: identical inputs always yield the same signature. Callers
/// must have rejected blank credentials beforehand (see
/// [`ProviderCredentials::new`]).
pub fn sign(
    access_key_id: &str,
    shared_secret: &str,
    endpoint_path: &str,
    timestamp_seconds: i64,
) -> Signature {
    let request = SigningRequest::new(endpoint_path, access_key_id, timestamp_seconds);
    let string_to_sign = canonical_string(&request);

    let mut mac =
        HmacSha1::new_from_slice(shared_secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());

    Signature(BASE64.encode(mac.finalize().into_bytes()))
}

/// Timestamp and signature produced by a single signing call
///
/// The timestamp sent to the provider must be the one that was signed, so
/// both travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedFields {
    pub timestamp_seconds: i64,
    pub signature: Signature,
}

/// Signer bound to one set of credentials and one endpoint path
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: ProviderCredentials,
    endpoint_path: String,
}

impl RequestSigner {
    pub fn new(credentials: ProviderCredentials, endpoint_path: impl Into<String>) -> Self {
        Self {
            credentials,
            endpoint_path: endpoint_path.into(),
        }
    }

    /// Sign with an explicit timestamp
    pub fn sign_at(&self, timestamp_seconds: i64) -> SignedFields {
        let signature = sign(
            self.credentials.access_key(),
            self.credentials.access_secret(),
            &self.endpoint_path,
            timestamp_seconds,
        );

        SignedFields {
            timestamp_seconds,
            signature,
        }
    }

    /// Capture the current Unix time once and sign with it
    pub fn sign_now(&self) -> SignedFields {
        self.sign_at(chrono::Utc::now().timestamp())
    }
}
