//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings, so the algorithm parameters and salt
//! travel with the hash and old hashes keep verifying after a parameter
//! change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                DomainError::new(ErrorCode::CryptoError, "Password processing failed")
            })?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::warn!(error = %e, "Stored password hash has invalid format");
            DomainError::new(ErrorCode::CryptoError, "Stored credential is unreadable")
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(ArgonError::Password) => Ok(false),
            Err(e) => {
                tracing::error!(error = %e, "Password verification failed");
                Err(DomainError::new(ErrorCode::CryptoError, "Password processing failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse battery", &hash).unwrap());
        assert!(!hasher.verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash("password123").unwrap(), hasher.hash("password123").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = Argon2PasswordHasher::new()
            .verify("anything", "plaintext")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CryptoError);
    }
}
