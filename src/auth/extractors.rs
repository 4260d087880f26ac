//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::User;
use super::token::validate_token;
use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the bearer token from the Authorization header, then re-fetches
/// the user row so handlers see live account state rather than stale token
/// claims. Every failure mode maps to 401.
#[derive(Debug)]
pub struct AuthedUser {
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Extension containing the AppState
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // Extract Bearer token from Authorization header
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!("Authentication failed: missing or malformed Authorization header");
                return Err(ApiError::Unauthorized("no token provided".to_string()));
            }
        };

        // Verify signature and expiry
        let claims = validate_token(token, &app_state.jwt_secret)?;

        // Fresh lookup so revoked or updated accounts are reflected immediately
        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&claims.sub)
            .fetch_optional(&app_state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    user_id = %claims.sub,
                    "Database error during user lookup in authentication"
                );
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                debug!(
                    user_id = %u.id,
                    email = %safe_email_log(&u.email),
                    "Request authenticated"
                );
                Ok(AuthedUser { user: u })
            }
            None => {
                warn!(user_id = %claims.sub, "Authentication failed: user not found");
                Err(ApiError::Unauthorized("user not found".to_string()))
            }
        }
    }
}
