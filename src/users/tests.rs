//! Tests for users module
//!
//! These tests verify profile blob storage and account detail updates.

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Json};
    use reqwest::Client;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use super::super::handlers;
    use super::super::models::UpdateAccountPayload;
    use crate::auth::extractors::AuthedUser;
    use crate::auth::User;
    use crate::common::{migrations, ApiError, AppState};

    async fn setup_state() -> Arc<RwLock<AppState>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Arc::new(RwLock::new(AppState {
            db: pool,
            http: Client::new(),
            jwt_secret: "test_secret_key".to_string(),
            google_client_id: None,
            google_client_secret: None,
            oauth_redirect_uri: "http://localhost:3001/auth/google/callback".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        }))
    }

    async fn insert_user(state: &Arc<RwLock<AppState>>, id: &str, email: &str) -> AuthedUser {
        let s = state.read().await;
        sqlx::query(
            "INSERT INTO users (id, username, email, name, provider) VALUES (?, ?, ?, ?, 'email')",
        )
        .bind(id)
        .bind(email.split('@').next().unwrap())
        .bind(email)
        .bind(email.split('@').next().unwrap())
        .execute(&s.db)
        .await
        .unwrap();

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&s.db)
            .await
            .unwrap();

        AuthedUser { user }
    }

    #[tokio::test]
    async fn test_profile_is_null_before_first_save() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let Json(body) = handlers::get_profile_handler(Extension(state), authed)
            .await
            .unwrap();

        assert!(body["profile"].is_null());
    }

    #[tokio::test]
    async fn test_profile_save_and_fetch_round_trip() {
        let state = setup_state().await;

        let blob = serde_json::json!({
            "goal": "cut",
            "daily_calories": 2100,
            "allergies": ["peanuts"]
        });

        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;
        let Json(saved) =
            handlers::save_profile_handler(Extension(state.clone()), authed, Json(blob.clone()))
                .await
                .unwrap();
        assert_eq!(saved["profile"], blob);

        let authed = insert_user(&state, "U_TEST02", "bob@x.com").await;
        let Json(other) = handlers::get_profile_handler(Extension(state.clone()), authed)
            .await
            .unwrap();
        // Profiles are per-user
        assert!(other["profile"].is_null());

        let s = state.read().await;
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = 'U_TEST01'")
            .fetch_one(&s.db)
            .await
            .unwrap();
        drop(s);

        let Json(fetched) =
            handlers::get_profile_handler(Extension(state.clone()), AuthedUser { user })
                .await
                .unwrap();
        assert_eq!(fetched["profile"], blob);
    }

    #[tokio::test]
    async fn test_profile_save_overwrites_previous_blob() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let first = serde_json::json!({ "goal": "bulk" });
        let second = serde_json::json!({ "goal": "maintain", "weight_kg": 71.5 });

        let user = authed.user.clone();
        handlers::save_profile_handler(Extension(state.clone()), authed, Json(first))
            .await
            .unwrap();
        handlers::save_profile_handler(
            Extension(state.clone()),
            AuthedUser { user: user.clone() },
            Json(second.clone()),
        )
        .await
        .unwrap();

        let Json(body) = handlers::get_profile_handler(Extension(state), AuthedUser { user })
            .await
            .unwrap();
        assert_eq!(body["profile"], second);
    }

    #[tokio::test]
    async fn test_update_account_requires_at_least_one_field() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let result = handlers::update_account_handler(
            Extension(state),
            authed,
            Json(UpdateAccountPayload {
                name: None,
                email: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_account_treats_blank_fields_as_absent() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        // Only blank fields supplied: nothing to update
        let user = authed.user.clone();
        let result = handlers::update_account_handler(
            Extension(state.clone()),
            authed,
            Json(UpdateAccountPayload {
                name: Some("  ".to_string()),
                email: Some("".to_string()),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        // A blank name alongside a real email must not wipe the stored name
        let Json(body) = handlers::update_account_handler(
            Extension(state),
            AuthedUser { user },
            Json(UpdateAccountPayload {
                name: Some("".to_string()),
                email: Some("alice.new@x.com".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["user"]["name"], "alice");
        assert_eq!(body["user"]["email"], "alice.new@x.com");
    }

    #[tokio::test]
    async fn test_update_account_changes_name_and_email() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let Json(body) = handlers::update_account_handler(
            Extension(state),
            authed,
            Json(UpdateAccountPayload {
                name: Some("Alice Smith".to_string()),
                email: Some("Alice.Smith@X.com".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["user"]["name"], "Alice Smith");
        // Emails are canonicalized to lowercase before storage
        assert_eq!(body["user"]["email"], "alice.smith@x.com");
    }

    #[tokio::test]
    async fn test_update_account_rejects_email_taken_by_another_user() {
        let state = setup_state().await;
        insert_user(&state, "U_TEST01", "alice@x.com").await;
        let authed = insert_user(&state, "U_TEST02", "bob@x.com").await;

        let result = handlers::update_account_handler(
            Extension(state),
            authed,
            Json(UpdateAccountPayload {
                name: None,
                email: Some("alice@x.com".to_string()),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_account_keeps_own_email() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        // Re-submitting the current email is not a conflict
        let Json(body) = handlers::update_account_handler(
            Extension(state),
            authed,
            Json(UpdateAccountPayload {
                name: Some("Alice".to_string()),
                email: Some("alice@x.com".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["user"]["email"], "alice@x.com");
    }
}
