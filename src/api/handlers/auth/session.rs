//! Session tokens (HS256 JWT) and the `token` cookie that carries them.

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::state::AuthConfig;

pub const SESSION_COOKIE_NAME: &str = "token";

/// Tokens and cookies both live for seven days.
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(user_id: Uuid, issued_at: i64) -> Self {
        Self {
            id: user_id.to_string(),
            is_admin: false,
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECONDS,
        }
    }
}

/// Sign a session token for `user_id`, issued at `issued_at` (unix seconds).
///
/// # Errors
/// Returns an error if the claims cannot be encoded.
pub fn issue(user_id: Uuid, secret: &SecretString, issued_at: i64) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, issued_at);
    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )?)
}

/// Verify signature and expiry of a session token.
///
/// # Errors
/// Returns an error for a bad signature, an expired token or malformed input.
pub fn decode(token: &str, secret: &SecretString) -> Result<Claims, TokenError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Build the `HttpOnly` cookie holding the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECONDS}"
    );
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
    );
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}
