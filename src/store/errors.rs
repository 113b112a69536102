//! # Store Errors

use std::path::Path;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading or persisting the collection
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing file could not be read or written
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The backing file does not hold a JSON array of books
    #[error("Malformed book file {path}: {message}")]
    Malformed { path: String, message: String },

    /// In-process state was poisoned by a panicking writer
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(path: &Path, err: impl ToString) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(path: &Path, err: impl ToString) -> Self {
        StoreError::Malformed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Store failures are always server side
    pub fn status_code(&self) -> u16 {
        500
    }
}
