//! Catalog-specific error types.

use crate::domain::authorization::AuthorizationError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// No product with the given id or name.
    NotFound(String),
    /// Image URL is not attached to the product.
    ImageNotFound(String),
    ValidationFailed { field: String, message: String },
    /// Rejected by the authorization gate.
    Denied(AuthorizationError),
    Infrastructure(String),
}

impl ProductError {
    pub fn not_found(key: impl ToString) -> Self {
        ProductError::NotFound(key.to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound(_) => ErrorCode::ProductNotFound,
            ProductError::ImageNotFound(_) => ErrorCode::BlobNotFound,
            ProductError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProductError::Denied(err) => err.code(),
            ProductError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProductError::NotFound(key) => format!("Product not found: {}", key),
            ProductError::ImageNotFound(url) => format!("Image not attached to product: {}", url),
            ProductError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProductError::Denied(err) => err.to_string(),
            ProductError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProductError {}

impl From<ValidationError> for ProductError {
    fn from(err: ValidationError) -> Self {
        ProductError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthorizationError> for ProductError {
    fn from(err: AuthorizationError) -> Self {
        ProductError::Denied(err)
    }
}

impl From<DomainError> for ProductError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ProductNotFound => ProductError::NotFound(err.message),
            ErrorCode::ValidationFailed => ProductError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ProductError::Infrastructure(err.to_string()),
        }
    }
}
