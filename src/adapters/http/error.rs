//! Error responses for the REST API.
//!
//! Every domain error exposes an [`ErrorCode`] and a message; `ApiError`
//! turns that pair into a status code and a JSON body:
//!
//! ```json
//! { "code": "FORBIDDEN", "message": "Not allowed to delete_product" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountError;
use crate::domain::catalog::ProductError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use crate::domain::sales::SaleError;
use crate::domain::staff::EmployeeError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// An error on its way out of an HTTP handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Malformed request input (bad multipart body, missing field).
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ValidationFailed,
            format!("Validation failed for '{}': {}", field, message.into()),
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

/// Status code for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        c if c.is_not_found() => StatusCode::NOT_FOUND,
        ErrorCode::EmailTaken | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::warn!(code = %self.code, message = %self.message, "Request denied");
            }
            s if s.is_server_error() => {
                tracing::error!(code = %self.code, message = %self.message, "Request failed");
            }
            _ => {
                tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
            }
        }

        let body = ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.field(), err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = if err.requires_reauthentication() {
            ErrorCode::Unauthorized
        } else {
            ErrorCode::InternalError
        };
        Self::new(code, err.to_string())
    }
}
