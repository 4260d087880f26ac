//! User profile data models

use serde::Deserialize;

/// PATCH /api/users/me request body
#[derive(Deserialize, Debug)]
pub struct UpdateAccountPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}
