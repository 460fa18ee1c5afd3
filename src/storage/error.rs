//! Storage-specific error types.
//!
//! All storage operations return [`StorageError`] on failure, which can be
//! matched to determine the underlying cause (pool, constraint, decode, etc.).
//! Raw driver errors are classified in the `From<sqlx::Error>` impl so that
//! callers never have to inspect `sqlx` internals themselves.

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::storage::statements::StatementKind;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No pooled connection could be acquired (timeout or closed pool).
    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(String),

    /// The backend rejected a write because of a uniqueness, foreign-key,
    /// not-null or check constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A single-row read matched no rows.
    #[error("customer {account_no} not found")]
    NotFound { account_no: i64 },

    /// A single-row read matched more than one row.
    #[error("expected one row for customer {account_no}, got {rows}")]
    AmbiguousResult { account_no: i64, rows: usize },

    /// A row could not be mapped into a customer.
    #[error("decode error: {0}")]
    Decode(String),

    /// A customer failed validation before any statement was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// A statement template does not match its binder arity.
    #[error("invalid {kind} statement: expected {expected} placeholders, found {found}")]
    InvalidStatement {
        kind: StatementKind,
        expected: usize,
        found: usize,
    },

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                Self::ConnectionUnavailable("timed out waiting for a pooled connection".into())
            }
            sqlx::Error::PoolClosed => {
                Self::ConnectionUnavailable("connection pool is closed".into())
            }
            sqlx::Error::ColumnNotFound(column) => {
                Self::Decode(format!("column '{column}' missing from row"))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                Self::Decode(format!("column {index}: {source}"))
            }
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Self::ConstraintViolation(db_err.message().to_string()),
                _ => Self::Database(sqlx::Error::Database(db_err)),
            },
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_connection_unavailable() {
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolTimedOut),
            StorageError::ConnectionUnavailable(_)
        ));
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolClosed),
            StorageError::ConnectionUnavailable(_)
        ));
    }

    #[test]
    fn test_missing_column_maps_to_decode() {
        let err = StorageError::from(sqlx::Error::ColumnNotFound("email".to_string()));
        assert!(matches!(err, StorageError::Decode(_)));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_other_errors_map_to_database() {
        assert!(matches!(
            StorageError::from(sqlx::Error::RowNotFound),
            StorageError::Database(_)
        ));
    }

    #[test]
    fn test_display_messages() {
        let err = StorageError::NotFound { account_no: 42 };
        assert_eq!(err.to_string(), "customer 42 not found");

        let err = StorageError::InvalidStatement {
            kind: StatementKind::Insert,
            expected: 7,
            found: 6,
        };
        assert_eq!(
            err.to_string(),
            "invalid insert statement: expected 7 placeholders, found 6"
        );
    }
}
