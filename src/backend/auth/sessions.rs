/**
 * Session Management and JWT Tokens
 *
 * Two token kinds are issued:
 *
 * - access tokens `{sub, email, iat, exp}`, signed with `JWT_SECRET`,
 *   sent as `Authorization: Bearer` on every protected request
 * - refresh tokens `{sub, iat, exp}`, signed with `JWT_REFRESH_SECRET`,
 *   exchanged at `/api/auth/refresh` for a new access token
 *
 * Secrets and lifetimes come from `AuthConfig`; nothing here reads the
 * environment.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::server::config::AuthConfig;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Refresh token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Why a token was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Create an access token for a user
///
/// # Arguments
///
/// * `config` - JWT secrets and lifetimes
/// * `user_id` - User ID (UUID)
/// * `email` - User email
pub fn create_access_token(
    config: &AuthConfig,
    user_id: Uuid,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = now_secs();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat,
        exp: iat.saturating_add(config.access_ttl.as_secs()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )
}

/// Create a refresh token for a user
pub fn create_refresh_token(config: &AuthConfig, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = now_secs();
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        iat,
        exp: iat.saturating_add(config.refresh_ttl.as_secs()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )
}

/// Verify and decode an access token
pub fn verify_access_token(config: &AuthConfig, token: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(config.access_secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

/// Verify and decode a refresh token
pub fn verify_refresh_token(config: &AuthConfig, token: &str) -> Result<RefreshClaims, TokenError> {
    let key = DecodingKey::from_secret(config.refresh_secret.as_bytes());
    let data = decode::<RefreshClaims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

/// User ID carried in the `sub` claim
pub fn subject(sub: &str) -> Result<Uuid, TokenError> {
    Uuid::parse_str(sub).map_err(|_| TokenError::Invalid)
}
