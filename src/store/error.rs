//! Error types for the log store.

use thiserror::Error;

/// Errors returned by [`LogStore`](super::LogStore) operations.
///
/// Driver messages are carried verbatim so they can be surfaced to HTTP
/// clients unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Creating the table or index failed. Fatal at startup.
    #[error("{0}")]
    Schema(String),

    /// A write batch failed and was rolled back.
    #[error("{0}")]
    Transaction(String),

    /// The read limit was not a non-negative integer.
    #[error("invalid limit: {0}")]
    InvalidArgument(String),

    /// A read or count query failed.
    #[error("{0}")]
    Query(String),
}

impl StoreError {
    pub fn schema(err: sqlx::Error) -> Self {
        StoreError::Schema(err.to_string())
    }

    pub fn transaction(err: sqlx::Error) -> Self {
        StoreError::Transaction(err.to_string())
    }

    pub fn query(err: sqlx::Error) -> Self {
        StoreError::Query(err.to_string())
    }

    /// Whether the failure was caused by the caller rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }
}
