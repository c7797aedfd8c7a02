//! Account-specific error types.

use crate::domain::authorization::AuthorizationError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by admin, customer and cart operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No admin with the given id or email.
    AdminNotFound(String),
    /// No customer with the given id or email.
    CustomerNotFound(String),
    CartItemNotFound(String),
    /// Referenced product does not exist.
    ProductNotFound(String),
    /// Email is already registered.
    EmailTaken(String),
    /// Password did not match, or the account has no password.
    InvalidCredentials,
    ValidationFailed { field: String, message: String },
    /// Rejected by the authorization gate.
    Denied(AuthorizationError),
    /// Infrastructure error.
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::AdminNotFound(_) => ErrorCode::AdminNotFound,
            AccountError::CustomerNotFound(_) => ErrorCode::CustomerNotFound,
            AccountError::CartItemNotFound(_) => ErrorCode::CartItemNotFound,
            AccountError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            AccountError::EmailTaken(_) => ErrorCode::EmailTaken,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Denied(err) => err.code(),
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccountError::AdminNotFound(key) => format!("No record found for admin: {}", key),
            AccountError::CustomerNotFound(key) => {
                format!("No record found for customer: {}", key)
            }
            AccountError::CartItemNotFound(id) => format!("Cart item not found: {}", id),
            AccountError::ProductNotFound(id) => format!("Product not found: {}", id),
            AccountError::EmailTaken(email) => format!("Email already in use: {}", email),
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::Denied(err) => err.to_string(),
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthorizationError> for AccountError {
    fn from(err: AuthorizationError) -> Self {
        AccountError::Denied(err)
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AdminNotFound => AccountError::AdminNotFound(err.message),
            ErrorCode::CustomerNotFound => AccountError::CustomerNotFound(err.message),
            ErrorCode::CartItemNotFound => AccountError::CartItemNotFound(err.message),
            ErrorCode::ProductNotFound => AccountError::ProductNotFound(err.message),
            ErrorCode::EmailTaken => AccountError::EmailTaken(err.message),
            ErrorCode::ValidationFailed => AccountError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}
