// src/auth/google.rs
//! Google OAuth client: authorization URL construction, code-for-token
//! exchange, and userinfo profile fetch.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use super::models::GoogleProfile;
use crate::common::AppState;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google OAuth not configured")]
    NotConfigured,

    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Token endpoint response for the authorization-code grant
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

/// Minimal Google OAuth client built from process configuration
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    client: Client,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuth {
    /// Build a client from app state; fails if client id/secret are unset
    pub fn from_state(state: &AppState) -> Result<Self, GoogleError> {
        let client_id = state
            .google_client_id
            .clone()
            .ok_or(GoogleError::NotConfigured)?;
        let client_secret = state
            .google_client_secret
            .clone()
            .ok_or(GoogleError::NotConfigured)?;

        Ok(Self {
            client: state.http.clone(),
            client_id,
            client_secret,
        })
    }

    /// Build the authorization URL the browser is redirected to
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        let scopes = ["openid", "email", "profile"];
        let scope_param = scopes.join(" ");

        format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&scope_param)
        )
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, GoogleError> {
        let params = [
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(GoogleError::OAuthFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))
    }

    /// Fetch the verified profile for an access token
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, GoogleError> {
        let response = self
            .client
            .get("https://openidconnect.googleapis.com/v1/userinfo")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            error!(status = %status, "Userinfo request failed");
            return Err(GoogleError::OAuthFailed(format!(
                "userinfo returned HTTP {}",
                status
            )));
        }

        response
            .json::<GoogleProfile>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))
    }
}
