//! Access token issuance port.

use crate::domain::foundation::{AuthError, Principal, Timestamp};

/// A signed access token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues access tokens for authenticated principals.
///
/// The counterpart of [`SessionValidator`](super::SessionValidator): a token
/// issued here validates back to the same principal.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError>;
}
