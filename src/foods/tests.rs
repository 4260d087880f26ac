//! Tests for foods module
//!
//! These tests verify the food intake log: creation defaults, per-user
//! listing order and delete scoping.

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Json, Path};
    use reqwest::Client;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use super::super::handlers;
    use super::super::models::CreateFoodPayload;
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
        sqlx::query("INSERT INTO users (id, email, name, provider) VALUES (?, ?, ?, 'email')")
            .bind(id)
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

    fn food_payload(name: &str, calories: f64) -> CreateFoodPayload {
        CreateFoodPayload {
            name: name.to_string(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            meal_type: None,
        }
    }

    #[tokio::test]
    async fn test_create_food_defaults_meal_type_to_breakfast() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let Json(body) = handlers::create_food_handler(
            Extension(state),
            authed,
            Json(food_payload("Oatmeal", 320.0)),
        )
        .await
        .unwrap();

        assert_eq!(body["food"]["name"], "Oatmeal");
        assert_eq!(body["food"]["calories"], 320.0);
        assert_eq!(body["food"]["meal_type"], "breakfast");
        assert!(body["food"]["id"].as_str().unwrap().starts_with("F_"));
        assert!(body["food"]["logged_at"].is_string());
        // The owning user id is internal, not part of the response shape
        assert!(body["food"].get("user_id").is_none());
    }

    #[tokio::test]
    async fn test_create_food_stores_macros() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let Json(body) = handlers::create_food_handler(
            Extension(state),
            authed,
            Json(CreateFoodPayload {
                name: "Chicken breast".to_string(),
                calories: 230.0,
                protein: 43.0,
                carbs: 0.0,
                fats: 5.0,
                meal_type: Some("lunch".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["food"]["protein"], 43.0);
        assert_eq!(body["food"]["fats"], 5.0);
        assert_eq!(body["food"]["meal_type"], "lunch");
    }

    #[tokio::test]
    async fn test_create_food_rejects_empty_name() {
        let state = setup_state().await;
        let authed = insert_user(&state, "U_TEST01", "alice@x.com").await;

        let result =
            handlers::create_food_handler(Extension(state), authed, Json(food_payload("  ", 100.0)))
                .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_list_foods_is_scoped_and_newest_first() {
        let state = setup_state().await;
        let alice = insert_user(&state, "U_TEST01", "alice@x.com").await;
        let bob = insert_user(&state, "U_TEST02", "bob@x.com").await;

        // Insert with explicit timestamps so the ordering is deterministic
        {
            let s = state.read().await;
            let rows = [
                ("F_OLD001", "U_TEST01", "Toast", "2026-08-25 08:00:00"),
                ("F_NEW001", "U_TEST01", "Salad", "2026-08-26 12:30:00"),
                ("F_BOB001", "U_TEST02", "Burger", "2026-08-26 19:00:00"),
            ];
            for (id, user_id, name, ts) in rows {
                sqlx::query(
                    "INSERT INTO food_entries (id, user_id, name, calories, timestamp) VALUES (?, ?, ?, 100, ?)",
                )
                .bind(id)
                .bind(user_id)
                .bind(name)
                .bind(ts)
                .execute(&s.db)
                .await
                .unwrap();
            }
        }

        let Json(body) = handlers::list_foods_handler(Extension(state.clone()), alice)
            .await
            .unwrap();
        let foods = body["foods"].as_array().unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0]["name"], "Salad");
        assert_eq!(foods[1]["name"], "Toast");

        let Json(body) = handlers::list_foods_handler(Extension(state), bob)
            .await
            .unwrap();
        let foods = body["foods"].as_array().unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0]["name"], "Burger");
    }

    #[tokio::test]
    async fn test_delete_food_is_scoped_to_owner() {
        let state = setup_state().await;
        let alice = insert_user(&state, "U_TEST01", "alice@x.com").await;
        let bob = insert_user(&state, "U_TEST02", "bob@x.com").await;

        let Json(created) = handlers::create_food_handler(
            Extension(state.clone()),
            alice,
            Json(food_payload("Oatmeal", 320.0)),
        )
        .await
        .unwrap();
        let food_id = created["food"]["id"].as_str().unwrap().to_string();

        // Another user deleting the entry is a no-op
        handlers::delete_food_handler(Extension(state.clone()), bob, Path(food_id.clone()))
            .await
            .unwrap();
        {
            let s = state.read().await;
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_entries")
                .fetch_one(&s.db)
                .await
                .unwrap();
            assert_eq!(count, 1);
        }

        // The owner can delete it
        let s = state.read().await;
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = 'U_TEST01'")
            .fetch_one(&s.db)
            .await
            .unwrap();
        drop(s);

        let Json(body) = handlers::delete_food_handler(
            Extension(state.clone()),
            AuthedUser { user },
            Path(food_id),
        )
        .await
        .unwrap();
        assert_eq!(body["success"], true);

        let s = state.read().await;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_entries")
            .fetch_one(&s.db)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
