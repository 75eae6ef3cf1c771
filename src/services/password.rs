/// Password hashing and verification using Argon2id
use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};

use crate::errors::{AppError, AppResult};

/// Hash a password with a fresh random salt; returns the PHC string for storage
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(rand::thread_rng());

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("invalid password hash format".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

/// Hash with the default cost that no account owns; verifying against it costs the
/// same as verifying a real user.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no account has this password").ok());

/// Spend one full verify on a login for an unknown username.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
