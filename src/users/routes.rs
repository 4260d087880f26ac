//! User profile routes

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

/// Creates and returns the users router
///
/// # Routes
/// - `GET /api/users/profile` - Get the stored profile blob
/// - `POST /api/users/profile` - Upsert the profile blob
/// - `PATCH /api/users/me` - Update account name/email
pub fn users_routes() -> Router {
    Router::new()
        .route(
            "/api/users/profile",
            get(handlers::get_profile_handler).post(handlers::save_profile_handler),
        )
        .route("/api/users/me", patch(handlers::update_account_handler))
}
