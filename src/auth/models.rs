//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

/// User database model
///
/// The canonical identity type: store rows, token claims and Google profiles
/// all convert to or from this shape at the boundary.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub provider: String,
    pub provider_id: Option<String>,
    pub created_at: Option<String>,
}

/// POST /auth/register request body
#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// POST /auth/login request body
#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Verified profile returned by Google's userinfo endpoint
#[derive(Deserialize, Debug, Clone)]
pub struct GoogleProfile {
    #[serde(rename = "sub")]
    pub provider_id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "picture")]
    pub avatar: Option<String>,
}
