//! Sale-specific error types.

use crate::domain::authorization::AuthorizationError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    NotFound(String),
    /// Referenced employee does not exist.
    EmployeeNotFound(String),
    /// Referenced product does not exist.
    ProductNotFound(String),
    ValidationFailed { field: String, message: String },
    /// Rejected by the authorization gate.
    Denied(AuthorizationError),
    Infrastructure(String),
}

impl SaleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SaleError::NotFound(_) => ErrorCode::SaleNotFound,
            SaleError::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            SaleError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            SaleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SaleError::Denied(err) => err.code(),
            SaleError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SaleError::NotFound(id) => format!("Sale not found: {}", id),
            SaleError::EmployeeNotFound(id) => format!("Employee not found: {}", id),
            SaleError::ProductNotFound(id) => format!("Product not found: {}", id),
            SaleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SaleError::Denied(err) => err.to_string(),
            SaleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SaleError {}

impl From<ValidationError> for SaleError {
    fn from(err: ValidationError) -> Self {
        SaleError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthorizationError> for SaleError {
    fn from(err: AuthorizationError) -> Self {
        SaleError::Denied(err)
    }
}

impl From<DomainError> for SaleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SaleNotFound => SaleError::NotFound(err.message),
            ErrorCode::EmployeeNotFound => SaleError::EmployeeNotFound(err.message),
            ErrorCode::ProductNotFound => SaleError::ProductNotFound(err.message),
            _ => SaleError::Infrastructure(err.to_string()),
        }
    }
}
