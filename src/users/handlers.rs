//! User profile and account handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::UpdateAccountPayload;
use crate::auth::{AuthedUser, User};
use crate::common::{safe_email_log, ApiError, AppState};

/// GET /api/users/profile - Get the stored profile blob
///
/// Returns `{"profile": null}` when the user has never saved one.
pub async fn get_profile_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let row: Option<(String,)> =
        sqlx::query_as("SELECT data FROM user_profiles WHERE user_id = ?")
            .bind(&authed.user.id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    let profile = match row {
        Some((data,)) => match serde_json::from_str::<serde_json::Value>(&data) {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    error = %e,
                    user_id = %authed.user.id,
                    "Stored profile data is not valid JSON, returning empty object"
                );
                serde_json::json!({})
            }
        },
        None => serde_json::Value::Null,
    };

    Ok(Json(serde_json::json!({ "profile": profile })))
}

/// POST /api/users/profile - Upsert the profile blob
///
/// The body is stored verbatim as JSON and echoed back.
pub async fn save_profile_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let data = serde_json::to_string(&body)
        .map_err(|_| ApiError::BadRequest("Invalid profile data".to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, data, updated_at)
        VALUES (?, ?, datetime('now'))
        ON CONFLICT(user_id) DO UPDATE SET
            data = excluded.data,
            updated_at = datetime('now')
        "#,
    )
    .bind(&authed.user.id)
    .bind(&data)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.user.id, "Profile saved");

    Ok(Json(serde_json::json!({ "profile": body })))
}

/// PATCH /api/users/me - Update account details (name and/or email)
pub async fn update_account_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<UpdateAccountPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // Blank fields count as absent; they never wipe a stored value
    let name = payload.name.filter(|n| !n.trim().is_empty());
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());

    if name.is_none() && email.is_none() {
        return Err(ApiError::BadRequest("No data to update".to_string()));
    }

    if let Some(email) = &email {
        let taken: Option<(String,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = ? AND id != ?")
                .bind(email)
                .bind(&authed.user.id)
                .fetch_optional(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        if taken.is_some() {
            warn!(
                user_id = %authed.user.id,
                email = %safe_email_log(email),
                "Account update rejected: email already in use"
            );
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
    }

    sqlx::query("UPDATE users SET name = COALESCE(?, name), email = COALESCE(?, email) WHERE id = ?")
        .bind(name.as_deref())
        .bind(email.as_deref())
        .bind(&authed.user.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.user.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = %user.id, "Account details updated");

    Ok(Json(serde_json::json!({ "user": user })))
}
