//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the authenticated principal, and the
//! error types that form the vocabulary of the Dynasty Urban Style domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, Principal, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdminId, AttendanceId, CartItemId, CustomerId, EmployeeId, ProductId, SaleId};
pub use timestamp::Timestamp;
