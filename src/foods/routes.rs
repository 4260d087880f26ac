//! Food entry routes

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers;

/// Creates and returns the foods router
///
/// # Routes
/// - `GET /api/foods` - List food entries, newest first
/// - `POST /api/foods` - Log a food entry
/// - `DELETE /api/foods/:id` - Remove a food entry
pub fn foods_routes() -> Router {
    Router::new()
        .route(
            "/api/foods",
            get(handlers::list_foods_handler).post(handlers::create_food_handler),
        )
        .route("/api/foods/:id", delete(handlers::delete_food_handler))
}
