//! Google account reconciliation
//!
//! Resolves a verified Google profile against the users table: match on an
//! already-bound provider id, link the federated identity onto an existing
//! account sharing the same email, or create a fresh account.

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::models::{GoogleProfile, User};
use crate::common::{generate_user_id, safe_email_log, ApiError};

/// How a Google profile was reconciled against the users table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A row already carried this provider id; nothing was written.
    Matched,
    /// An existing account with the same email was bound to the provider id.
    Linked,
    /// No match on provider id or email; a new account was created.
    Created,
}

/// Find or create the local account for a Google profile
///
/// Emails are lowercased before comparison and storage, so two logins
/// differing only in case resolve to the same account.
pub async fn link_google_profile(
    pool: &SqlitePool,
    profile: &GoogleProfile,
) -> Result<(User, LinkOutcome), ApiError> {
    let email = profile.email.trim().to_lowercase();

    // 1. Match on provider id
    let matched: Option<User> = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE provider = 'google' AND provider_id = ?",
    )
    .bind(&profile.provider_id)
    .fetch_optional(pool)
    .await
    .map_err(ApiError::DatabaseError)?;

    if let Some(user) = matched {
        debug!(
            user_id = %user.id,
            provider_id = %profile.provider_id,
            "Google profile matched existing account"
        );
        return Ok((user, LinkOutcome::Matched));
    }

    // 2. Link onto an existing account with the same email
    let by_email: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    if let Some(existing) = by_email {
        info!(
            user_id = %existing.id,
            email = %safe_email_log(&email),
            "Linking Google identity to existing account"
        );

        // The password hash, if any, is left in place so password login keeps
        // working after the link.
        sqlx::query("UPDATE users SET provider_id = ?, avatar = ?, provider = 'google' WHERE id = ?")
            .bind(&profile.provider_id)
            .bind(profile.avatar.as_deref())
            .bind(&existing.id)
            .execute(pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        let refreshed = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&existing.id)
            .fetch_one(pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        return Ok((refreshed, LinkOutcome::Linked));
    }

    // 3. Create a new account
    let id = generate_user_id();
    info!(
        user_id = %id,
        email = %safe_email_log(&email),
        "Creating new user account via Google OAuth"
    );

    sqlx::query(
        "INSERT INTO users (id, email, name, avatar, provider, provider_id) VALUES (?, ?, ?, ?, 'google', ?)",
    )
    .bind(&id)
    .bind(&email)
    .bind(profile.name.as_deref())
    .bind(profile.avatar.as_deref())
    .bind(&profile.provider_id)
    .execute(pool)
    .await
    .map_err(ApiError::DatabaseError)?;

    let created = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok((created, LinkOutcome::Created))
}
