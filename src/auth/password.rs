//! Password hashing and verification for username/password accounts

use tracing::error;

use crate::common::ApiError;

/// bcrypt cost factor applied at registration time
const BCRYPT_COST: u32 = 10;

/// Minimum accepted password length, checked before hashing
pub const MIN_PASSWORD_LEN: usize = 6;

/// One-way hash of a plaintext password
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    bcrypt::hash(plain, BCRYPT_COST).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ApiError::InternalServer("password hashing failed".to_string())
    })
}

/// Compare a plaintext password against a stored digest
pub fn verify_password(plain: &str, digest: &str) -> Result<bool, ApiError> {
    bcrypt::verify(plain, digest).map_err(|e| {
        error!(error = %e, "Password verification failed");
        ApiError::InternalServer("password verification failed".to_string())
    })
}
