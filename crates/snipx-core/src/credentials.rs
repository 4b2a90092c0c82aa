//! Password hashing (argon2, PHC string format)

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::core_types::Sensitive;
use crate::errors::{Result, SnipError};

/// Hash a password with a fresh random salt
///
/// # Errors
///
/// Returns `SnipError::Credential` if the hasher rejects the input.
pub fn hash_password(password: &Sensitive<String>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SnipError::Credential {
            message: e.to_string(),
        })
}

/// Check a password against a stored PHC hash
///
/// A malformed stored hash never verifies.
pub fn verify_password(password: &Sensitive<String>, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::debug!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.expose().as_bytes(), &parsed)
        .is_ok()
}
