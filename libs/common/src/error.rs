//! Error types for the shared database plumbing

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Failures raised while configuring or talking to PostgreSQL.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not be established.
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed after the pool was up.
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// The connection settings themselves are unusable.
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
