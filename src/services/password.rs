//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings, so algorithm parameters and salt travel
//! with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{LedgerError, LedgerResult};

/// Hashes a plaintext password with a random salt.
pub fn hash_password(password: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LedgerError::Internal {
            message: format!("password hashing failed: {e}"),
        })
}

/// Checks a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; a malformed hash is an internal error.
pub fn verify_password(password: &str, hash: &str) -> LedgerResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| LedgerError::Internal {
        message: format!("stored password hash is invalid: {e}"),
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(LedgerError::Internal {
            message: format!("password verification failed: {e}"),
        }),
    }
}
