//! Signed session tokens
//!
//! Compact JWTs signed with HS256. The signing key is a per-application
//! secret, so any party holding that secret can verify a token offline.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT errors
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Signing secret is empty")]
    MissingSecret,

    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token decoding failed: {0}")]
    DecodingError(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                JwtError::InvalidToken
            }
            _ => JwtError::DecodingError(err.to_string()),
        }
    }
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub uid: i64,
    /// User email, as stored
    pub email: String,
    /// Application the token was issued for
    pub app_id: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Claims valid from now until now + `ttl`
    pub fn new(uid: i64, email: impl Into<String>, app_id: i64, ttl: Duration) -> Self {
        let iat = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            uid,
            email: email.into(),
            app_id,
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }
}

/// Sign `claims` with `secret`
pub fn issue_token(claims: &TokenClaims, secret: &[u8]) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .map_err(|e| JwtError::EncodingError(e.to_string()))
}

/// Verify signature and expiry, returning the claims
pub fn verify_token(token: &str, secret: &[u8]) -> Result<TokenClaims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let mut validation = Validation::default();
    // Strict expiration checking
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)?;

    Ok(token_data.claims)
}
