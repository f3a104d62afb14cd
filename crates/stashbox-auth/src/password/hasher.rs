//! Argon2id hashing for stored credentials.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};

use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;

/// Hashes and checks passwords with Argon2id.
///
/// The hasher owns its Argon2 context, so the cost parameters are fixed
/// at construction. The PHC string stored per user carries the salt and
/// the parameters it was produced with, which keeps verification
/// working across parameter changes.
#[derive(Clone)]
pub struct PasswordHasher {
    context: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher with the library's recommended parameters.
    pub fn new() -> Self {
        Self {
            context: Argon2::default(),
        }
    }

    /// Hashes a password under a fresh random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .context
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Could not hash password: {e}")))?;
        Ok(hash.to_string())
    }

    /// Checks a password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; only a malformed stored hash or an
    /// Argon2 failure surfaces as an error.
    pub fn verify_password(&self, password: &str, stored: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

        match self.context.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Password check failed: {e}"))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("hunter2a").unwrap();

        assert!(hasher.verify_password("hunter2a", &hash).unwrap());
        assert!(!hasher.verify_password("hunter2b", &hash).unwrap());
    }

    #[test]
    fn repeated_hashes_are_salted_differently() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash_password("hunter2a").unwrap();
        let second = hasher.hash_password("hunter2a").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn garbled_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = PasswordHasher::new();
        let err = hasher
            .verify_password("hunter2a", "not-a-phc-string")
            .unwrap_err();

        assert_eq!(err.kind, stashbox_core::error::ErrorKind::Internal);
    }
}
