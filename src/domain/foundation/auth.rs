//! Authentication types for the domain layer.
//!
//! A [`Principal`] is what the authentication collaborator hands to the rest
//! of the system once a token has been verified. It is a projection of a
//! persisted Admin or Customer record and lives for a single request.
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let principal = Principal::new(customer.id().to_string(), Role::User);
//! request.extensions_mut().insert(principal);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account role carried by a principal.
///
/// Anything other than `ADMIN` or `USER` parses to [`Role::Unrecognized`],
/// which receives the read-only default rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
    Unrecognized,
}

impl Role {
    /// Parses a role claim. Never fails.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(r) if r.eq_ignore_ascii_case("ADMIN") => Role::Admin,
            Some(r) if r.eq_ignore_ascii_case("USER") => Role::User,
            _ => Role::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated actor behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Builds a principal from raw token claims.
    ///
    /// A blank subject is treated as no principal at all; a missing or
    /// unknown role degrades to [`Role::Unrecognized`].
    pub fn from_claims(subject: &str, role: Option<&str>) -> Option<Self> {
        let subject = subject.trim();
        if subject.is_empty() {
            return None;
        }
        Some(Self::new(subject, Role::parse(role)))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token could not be produced (signing failure).
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),

    /// The account behind a valid token could not be looked up.
    #[error("Account lookup failed: {0}")]
    LookupFailed(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse_case_insensitively() {
        assert_eq!(Role::parse(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::parse(Some("admin")), Role::Admin);
        assert_eq!(Role::parse(Some(" User ")), Role::User);
    }

    #[test]
    fn unknown_or_missing_role_is_unrecognized() {
        assert_eq!(Role::parse(Some("GUEST")), Role::Unrecognized);
        assert_eq!(Role::parse(Some("")), Role::Unrecognized);
        assert_eq!(Role::parse(None), Role::Unrecognized);
    }

    #[test]
    fn blank_subject_yields_no_principal() {
        assert!(Principal::from_claims("   ", Some("USER")).is_none());
    }

    #[test]
    fn claims_without_role_yield_unrecognized_principal() {
        let p = Principal::from_claims("42", None).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.role, Role::Unrecognized);
        assert!(!p.is_admin());
    }

    #[test]
    fn role_serializes_as_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::User.to_string(), "USER");
    }

    #[test]
    fn reauthentication_required_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::IssuanceFailed("x".into()).requires_reauthentication());
    }
}
