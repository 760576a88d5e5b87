//! Error types for lightbnb-db
//!
//! Every statement failure is reported as `QueryFailed`, carrying the
//! operation name and the driver error as its source. A missing row is not
//! an error: lookups return `Option`.

use thiserror::Error;

use crate::models::ValidationError;

/// Main error type for data-access operations
#[derive(Error, Debug)]
pub enum DbError {
    /// A statement failed to execute (connectivity, syntax, constraint)
    #[error("query failed in {operation}: {source}")]
    QueryFailed {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The connection pool could not be established
    #[error("failed to connect to database: {source}")]
    Connect {
        #[source]
        source: sqlx::Error,
    },

    /// Missing or malformed connection settings
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Input rejected before reaching the database
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for data-access operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Wrap a driver error raised while running `operation`
    pub fn query_failed(operation: &'static str, source: sqlx::Error) -> Self {
        Self::QueryFailed { operation, source }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True when the error came from executing a statement.
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }
}
