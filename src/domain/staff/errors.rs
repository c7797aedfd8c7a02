//! Staff-specific error types.

use crate::domain::authorization::AuthorizationError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeError {
    NotFound(String),
    AttendanceNotFound(String),
    /// Another employee already uses this email.
    EmailTaken(String),
    /// Operation not allowed in the record's current state.
    InvalidState(String),
    ValidationFailed { field: String, message: String },
    /// Rejected by the authorization gate.
    Denied(AuthorizationError),
    Infrastructure(String),
}

impl EmployeeError {
    pub fn not_found(id: impl ToString) -> Self {
        EmployeeError::NotFound(id.to_string())
    }

    pub fn attendance_not_found(id: impl ToString) -> Self {
        EmployeeError::AttendanceNotFound(id.to_string())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        EmployeeError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EmployeeError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EmployeeError::NotFound(_) => ErrorCode::EmployeeNotFound,
            EmployeeError::AttendanceNotFound(_) => ErrorCode::AttendanceNotFound,
            EmployeeError::EmailTaken(_) => ErrorCode::EmailTaken,
            EmployeeError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            EmployeeError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EmployeeError::Denied(err) => err.code(),
            EmployeeError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EmployeeError::NotFound(id) => format!("Employee not found: {}", id),
            EmployeeError::AttendanceNotFound(id) => format!("Attendance not found: {}", id),
            EmployeeError::EmailTaken(email) => format!("Email already in use: {}", email),
            EmployeeError::InvalidState(msg) => format!("Invalid state: {}", msg),
            EmployeeError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EmployeeError::Denied(err) => err.to_string(),
            EmployeeError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EmployeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EmployeeError {}

impl From<ValidationError> for EmployeeError {
    fn from(err: ValidationError) -> Self {
        EmployeeError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthorizationError> for EmployeeError {
    fn from(err: AuthorizationError) -> Self {
        EmployeeError::Denied(err)
    }
}

impl From<DomainError> for EmployeeError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmployeeNotFound => EmployeeError::NotFound(err.message),
            ErrorCode::AttendanceNotFound => EmployeeError::AttendanceNotFound(err.message),
            ErrorCode::EmailTaken => EmployeeError::EmailTaken(err.message),
            ErrorCode::InvalidStateTransition => EmployeeError::InvalidState(err.message),
            ErrorCode::ValidationFailed => EmployeeError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => EmployeeError::Infrastructure(err.to_string()),
        }
    }
}
