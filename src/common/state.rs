// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;

/// Application state containing the database pool and configuration
/// loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    pub jwt_secret: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub oauth_redirect_uri: String,
    pub frontend_url: String,
}
