//! Food entry handlers

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{CreateFoodPayload, FoodEntry};
use crate::auth::AuthedUser;
use crate::common::{generate_food_id, ApiError, AppState};

/// GET /api/foods - List the user's food entries, newest first
pub async fn list_foods_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let foods = sqlx::query_as::<_, FoodEntry>(
        "SELECT * FROM food_entries WHERE user_id = ? ORDER BY timestamp DESC",
    )
    .bind(&authed.user.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(serde_json::json!({ "foods": foods })))
}

/// POST /api/foods - Log a food entry
pub async fn create_food_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<CreateFoodPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Food name is required".to_string()));
    }

    let id = generate_food_id();
    let meal_type = payload.meal_type.as_deref().unwrap_or("breakfast");

    sqlx::query(
        r#"
        INSERT INTO food_entries (id, user_id, name, calories, protein, carbs, fats, meal_type, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&id)
    .bind(&authed.user.id)
    .bind(payload.name.trim())
    .bind(payload.calories)
    .bind(payload.protein)
    .bind(payload.carbs)
    .bind(payload.fats)
    .bind(meal_type)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let food = sqlx::query_as::<_, FoodEntry>("SELECT * FROM food_entries WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.user.id, food_id = %id, "Food entry logged");

    Ok(Json(serde_json::json!({ "food": food })))
}

/// DELETE /api/foods/:id - Remove a food entry owned by the user
pub async fn delete_food_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // Scoped to the authenticated user; deleting someone else's entry is a no-op
    sqlx::query("DELETE FROM food_entries WHERE id = ? AND user_id = ?")
        .bind(&id)
        .bind(&authed.user.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(serde_json::json!({ "success": true })))
}
