/**
 * Session Management and JWT Tokens
 *
 * This module issues and verifies the HS256 access tokens used by both the
 * REST routes (`Authorization: Bearer`) and the websocket channels
 * (`?token=` query parameter).
 *
 * The subject of a token is the user's email; the username travels as an
 * extra claim so sessions can label outbound events without a store read.
 */

use std::sync::OnceLock;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEV_SECRET: &str = "blink-development-secret-change-me";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email
    pub sub: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Who a verified credential belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Lower-cased email, the routing key for presence
    pub email: String,
    pub username: String,
}

/// Token verification failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime out of range: {0} hours")]
    LifetimeOutOfRange(i64),
}

/// Get JWT secret from environment
///
/// Falls back to a development secret, logging a warning the first time.
fn get_jwt_secret() -> &'static str {
    static SECRET: OnceLock<String> = OnceLock::new();
    SECRET.get_or_init(|| match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            tracing::warn!("[Auth] JWT_SECRET not set, using development secret");
            DEV_SECRET.to_string()
        }
    })
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `email` - User email, stored lower-cased as the subject
/// * `username` - Display name
/// * `ttl_hours` - Token lifetime
///
/// # Returns
/// JWT token string
///
/// # Errors
/// `AuthError::LifetimeOutOfRange` when the expiry cannot be represented,
/// `AuthError::InvalidToken` when signing fails.
pub fn create_token(email: &str, username: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let expires = TimeDelta::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(AuthError::LifetimeOutOfRange(ttl_hours))?;
    let claims = Claims {
        sub: email.to_lowercase(),
        username: username.to_string(),
        exp: expires.timestamp(),
        iat: now.timestamp(),
    };

    let key = EncodingKey::from_secret(get_jwt_secret().as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(get_jwt_secret().as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Resolve an opaque credential to an identity
///
/// # Errors
///
/// `AuthError::MissingToken` for an absent or blank token,
/// `AuthError::InvalidToken` when verification fails or has expired.
pub fn resolve_identity(token: Option<&str>) -> Result<Identity, AuthError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;
    let claims = verify_token(token)?;
    Ok(Identity {
        email: claims.sub.to_lowercase(),
        username: claims.username,
    })
}
