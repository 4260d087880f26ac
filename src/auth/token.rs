//! JWT issuance and validation
//!
//! Tokens are stateless bearer credentials with a fixed 7-day lifetime. There
//! is no revocation list: a valid, unexpired token is always accepted.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::{Claims, User};
use crate::common::ApiError;

/// Fixed bearer token lifetime
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Issue a signed token for a user, expiring TOKEN_TTL_DAYS from now
pub fn issue_token(user: &User, secret: &str) -> Result<String, ApiError> {
    issue_token_at(user, secret, Utc::now())
}

/// Issue a token with an explicit issuance instant
pub fn issue_token_at(
    user: &User,
    secret: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        iat: issued_at.timestamp() as usize,
        exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user.id, "JWT encoding error");
        ApiError::InternalServer("jwt error".to_string())
    })
}

/// Verify signature and expiry, returning the embedded claims
///
/// Expired and malformed tokens are logged distinctly but both collapse to a
/// generic 401 for the caller.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = %e, "JWT token validation failed");
        ApiError::Unauthorized("invalid token".to_string())
    })
}
