//! Password hashing port.

use crate::domain::foundation::DomainError;

/// One-way password hashing.
///
/// Hashes are self-describing strings (algorithm, parameters and salt are
/// embedded), so `verify` needs nothing but the stored hash.
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    ///
    /// - `CryptoError` if hashing fails
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// - `CryptoError` if the stored hash cannot be parsed
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
