//! Mock token service for tests.
//!
//! Implements `TokenIssuer` and `SessionValidator` over an in-process map so
//! tests can mint tokens for arbitrary principals without signing anything.
//!
//! ```ignore
//! let tokens = MockTokenService::new().with_principal("admin-token", Principal::new("a1", Role::Admin));
//! let principal = tokens.validate("admin-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal, Timestamp};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

#[derive(Debug, Default)]
pub struct MockTokenService {
    tokens: RwLock<HashMap<String, Principal>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockTokenService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as valid for `principal`.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.add_token(token, principal);
        self
    }

    /// Makes every validation fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, principal: Principal) {
        self.tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(token.into(), principal);
    }

    pub fn token_count(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl TokenIssuer for MockTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        let token = format!("mock-{}-{}", principal.role.as_str().to_lowercase(), principal.id);
        self.add_token(token.clone(), principal.clone());
        Ok(IssuedToken {
            token,
            expires_at: Timestamp::now().add_seconds(3600),
        })
    }
}

#[async_trait]
impl SessionValidator for MockTokenService {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
