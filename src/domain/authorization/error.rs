//! Authorization rejections.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::PolicyHandler;

/// Why a guarded operation was refused. Neither case is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("Authentication required for {operation}")]
    NotAuthenticated { operation: &'static str },

    #[error("Forbidden: {operation} requires {policy}")]
    Forbidden {
        operation: &'static str,
        policy: PolicyHandler,
    },
}

impl AuthorizationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthorizationError::NotAuthenticated { .. } => ErrorCode::Unauthorized,
            AuthorizationError::Forbidden { .. } => ErrorCode::Forbidden,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            AuthorizationError::NotAuthenticated { operation }
            | AuthorizationError::Forbidden { operation, .. } => operation,
        }
    }
}

impl From<AuthorizationError> for DomainError {
    fn from(err: AuthorizationError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string())
            .with_detail("operation", err.operation());
        match err {
            AuthorizationError::Forbidden { policy, .. } => {
                domain.with_detail("policy", policy.to_string())
            }
            AuthorizationError::NotAuthenticated { .. } => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_distinguish_missing_identity_from_missing_permission() {
        let unauthenticated = AuthorizationError::NotAuthenticated {
            operation: "list_customers",
        };
        let forbidden = AuthorizationError::Forbidden {
            operation: "delete_product",
            policy: PolicyHandler::DELETE_PRODUCT,
        };
        assert_eq!(unauthenticated.code(), ErrorCode::Unauthorized);
        assert_eq!(forbidden.code(), ErrorCode::Forbidden);
        assert_eq!(forbidden.operation(), "delete_product");
    }

    #[test]
    fn forbidden_converts_to_domain_error_with_policy() {
        let err: DomainError = AuthorizationError::Forbidden {
            operation: "delete_product",
            policy: PolicyHandler::DELETE_PRODUCT,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(
            err.details.get("policy").map(String::as_str),
            Some("delete ProductModel")
        );
    }
}
