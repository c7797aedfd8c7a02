//! Row decoding and error mapping shared by the repositories.

use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Maps a driver error to `DatabaseError`, naming what was attempted.
pub(super) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "Failed to {}", action);
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
    }
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(super) fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

/// Reads a non-negative integer column stored as BIGINT.
pub(super) fn count(row: &PgRow, name: &str) -> Result<u32, DomainError> {
    let value: i64 = column(row, name)?;
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Column {} out of range: {}", name, value),
        )
    })
}

pub(super) fn not_found(code: ErrorCode, id: impl std::fmt::Display) -> DomainError {
    DomainError::new(code, id.to_string())
}
