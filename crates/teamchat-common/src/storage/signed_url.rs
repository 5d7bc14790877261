//! Signed blob URLs
//!
//! Access URLs embed an HS256 token carrying the storage key, the filename,
//! and an expiry, so the file-serving edge can verify access without a
//! database round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// Claims embedded in a signed blob URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobClaims {
    /// Storage key of the blob
    pub key: String,
    /// Original filename, for Content-Disposition at the serving edge
    pub filename: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies time-limited blob access URLs
#[derive(Clone)]
pub struct UrlSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
    base_url: String,
}

impl UrlSigner {
    /// Create a signer with an explicit secret, TTL, and base URL
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64, base_url: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            base_url: base_url.into(),
        }
    }

    /// Create a signer from storage configuration
    #[must_use]
    pub fn from_config(secret: &str, config: &StorageConfig) -> Self {
        Self::new(secret, config.signed_url_ttl_secs, config.public_base_url.clone())
    }

    /// Sign a storage key into a time-limited access URL
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign(&self, storage_key: &str, filename: &str) -> AppResult<String> {
        let claims = BlobClaims {
            key: storage_key.to_string(),
            filename: filename.to_string(),
            exp: (Utc::now() + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("url signing failed: {e}")))?;

        Ok(format!("{}/files/{token}", self.base_url))
    }

    /// Verify a URL token and return its claims
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired URLs, `InvalidToken` otherwise
    pub fn verify(&self, token: &str) -> AppResult<BlobClaims> {
        decode::<BlobClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}
