//! JWT utilities for authentication
//!
//! Token verification for the chat surface. Keys are derived once from the
//! immutable `JwtConfig` at construction; nothing reads the secret afterwards.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.sub.parse::<Uuid>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT service for encoding and decoding access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service from configuration
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
        }
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("token encoding failed: {e}")))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired tokens, `InvalidToken` otherwise
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Verify a token and resolve the authenticated user ID
    pub fn verify_user(&self, token: &str) -> Result<Uuid, AppError> {
        self.verify(token)?.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-at-least-32-bytes-long!".to_string(),
            access_token_expiry: 900,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let token = svc.issue_access_token(user_id).unwrap();
        let resolved = svc.verify_user(&token).unwrap();
        assert_eq!(resolved, user_id);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let svc = service();
        assert!(matches!(
            svc.verify("not.a.token"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let svc = service();
        let other = JwtService::new(&JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            access_token_expiry: 900,
        });

        let token = svc.issue_access_token(Uuid::new_v4()).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_invalid() {
        let claims = Claims {
            sub: "12345".to_string(),
            iat: 0,
            exp: i64::MAX,
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
