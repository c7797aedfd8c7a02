//! Session validation that ties a token to a live account.
//!
//! Wraps a token validator and, once the token checks out, looks the
//! subject up in the admin or customer table for its role. A token whose
//! account has been deleted is rejected as invalid.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AdminId, AuthError, CustomerId, DomainError, Principal, Role};
use crate::ports::{AdminRepository, CustomerRepository, SessionValidator};

pub struct AccountSessionValidator {
    tokens: Arc<dyn SessionValidator>,
    admins: Arc<dyn AdminRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl AccountSessionValidator {
    pub fn new(
        tokens: Arc<dyn SessionValidator>,
        admins: Arc<dyn AdminRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            tokens,
            admins,
            customers,
        }
    }

    async fn account_exists(&self, principal: &Principal) -> Result<bool, AuthError> {
        match principal.role {
            Role::Admin => {
                let Ok(id) = principal.id.parse::<AdminId>() else {
                    return Ok(false);
                };
                Ok(self.admins.find_by_id(&id).await.map_err(lookup_failed)?.is_some())
            }
            Role::User => {
                let Ok(id) = principal.id.parse::<CustomerId>() else {
                    return Ok(false);
                };
                Ok(self.customers.find_by_id(&id).await.map_err(lookup_failed)?.is_some())
            }
            // No account kind to check; the rule table keeps it read-only.
            Role::Unrecognized => Ok(true),
        }
    }
}

fn lookup_failed(err: DomainError) -> AuthError {
    tracing::error!(error = %err, "Account lookup during authentication failed");
    AuthError::LookupFailed(err.to_string())
}

impl std::fmt::Debug for AccountSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSessionValidator").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionValidator for AccountSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let principal = self.tokens.validate(token).await?;
        if !self.account_exists(&principal).await? {
            tracing::warn!(
                subject = %principal.id,
                role = principal.role.as_str(),
                "Token refers to a missing account"
            );
            return Err(AuthError::InvalidToken);
        }
        Ok(principal)
    }
}
