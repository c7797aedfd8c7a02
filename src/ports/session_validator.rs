//! Session validation port.
//!
//! Verifies an access token and yields the [`Principal`] it was issued for.
//! The HTTP middleware depends only on this trait, so tests can swap in a
//! mock without signing real tokens.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// # Errors
    ///
    /// - `InvalidToken` for malformed, tampered or subject-less tokens
    /// - `TokenExpired` once the expiry has passed
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}
