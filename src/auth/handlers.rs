//! Authentication handlers

use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::Redirect,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::google::GoogleOAuth;
use super::linker::link_google_profile;
use super::models::{LoginPayload, RegisterPayload, User};
use super::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use super::token::issue_token;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};

/// POST /auth/register
/// Creates a username/password account and returns the user with a fresh token
///
/// # Response (201)
/// ```json
/// { "user": { ... }, "token": "<jwt>" }
/// ```
pub async fn register_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    if payload.username.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::BadRequest(
            "Username, email, and password are required".to_string(),
        ));
    }

    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    // Advisory duplicate check; the unique constraints on username/email are
    // the authoritative safeguard under concurrent registration.
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = ? OR email = ?")
            .bind(&username)
            .bind(&email)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        return Err(ApiError::Conflict(
            "Username or email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let id = generate_user_id();

    if let Err(e) = sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, phone, name, provider) VALUES (?, ?, ?, ?, ?, ?, 'email')",
    )
    .bind(&id)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(payload.phone.as_deref())
    .bind(&username)
    .execute(&state.db)
    .await
    {
        // Lost the race against a concurrent registration
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            warn!(email = %safe_email_log(&email), "Registration hit unique constraint");
            return Err(ApiError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        return Err(ApiError::DatabaseError(e));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let token = issue_token(&user, &state.jwt_secret)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "New user registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "user": user, "token": token })),
    ))
}

/// POST /auth/login
/// Verifies username (or email) and password, returning the user and a token
pub async fn login_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    // The login field may be a username or an email address
    let login = payload.username.trim();
    let user: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ? OR email = ?")
            .bind(login)
            .bind(login.to_lowercase())
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(login = %login, "Login failed: unknown user");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    let digest = match &user.password_hash {
        Some(d) => d,
        None => {
            warn!(user_id = %user.id, "Login rejected: account has no password");
            return Err(ApiError::Unauthorized(
                "This account uses Google login".to_string(),
            ));
        }
    };

    if !verify_password(&payload.password, digest)? {
        warn!(user_id = %user.id, "Login failed: bad password");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(&user, &state.jwt_secret)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User logged in"
    );

    Ok(Json(serde_json::json!({ "user": user, "token": token })))
}

/// GET /auth/me
/// Returns the current authenticated user's information
pub async fn me_handler(authed: AuthedUser) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(serde_json::json!({ "user": authed.user })))
}

/// POST /auth/logout
/// Tokens are stateless, so logout is handled client-side by discarding the
/// token; this endpoint just confirms the request
pub async fn logout_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logged out successfully" }))
}

/// GET /auth/google - Start the Google OAuth flow
/// Redirects the browser to Google's authorization page
pub async fn google_oauth_start(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Redirect, ApiError> {
    let state = state_lock.read().await.clone();

    let oauth = GoogleOAuth::from_state(&state).map_err(|e| {
        error!(error = %e, "Google OAuth is not configured");
        ApiError::InternalServer("Google OAuth not configured".to_string())
    })?;

    let auth_url = oauth.authorization_url(&state.oauth_redirect_uri);
    info!("Redirecting to Google OAuth");
    Ok(Redirect::to(&auth_url))
}

/// GET /auth/google/callback - Handle the OAuth redirect from Google
///
/// Exchanges the authorization code, fetches the verified profile, reconciles
/// it against the users table and redirects the browser back to the frontend
/// with a freshly issued token. Provider-side failures redirect to the login
/// page instead of returning JSON.
pub async fn google_oauth_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let state = state_lock.read().await.clone();
    let login_redirect = format!("{}/login", state.frontend_url);

    if let Some(error) = params.get("error") {
        warn!(oauth_error = %error, "Google OAuth returned error");
        return Ok(Redirect::to(&login_redirect));
    }

    let code = match params.get("code") {
        Some(c) => c,
        None => {
            warn!("OAuth callback missing authorization code");
            return Ok(Redirect::to(&login_redirect));
        }
    };

    let oauth = GoogleOAuth::from_state(&state).map_err(|e| {
        error!(error = %e, "Google OAuth is not configured");
        ApiError::InternalServer("Google OAuth not configured".to_string())
    })?;

    let tokens = match oauth.exchange_code(code, &state.oauth_redirect_uri).await {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Authorization code exchange failed");
            return Ok(Redirect::to(&login_redirect));
        }
    };

    let profile = match oauth.fetch_profile(&tokens.access_token).await {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Fetching Google profile failed");
            return Ok(Redirect::to(&login_redirect));
        }
    };

    let (user, outcome) = link_google_profile(&state.db, &profile).await?;
    let token = issue_token(&user, &state.jwt_secret)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        outcome = ?outcome,
        "Google OAuth login successful"
    );

    Ok(Redirect::to(&format!(
        "{}?token={}",
        state.frontend_url,
        urlencoding::encode(&token)
    )))
}
