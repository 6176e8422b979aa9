//! Store error types

use thiserror::Error;

/// Errors that can occur in the SQLite store
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite rejected a statement
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
