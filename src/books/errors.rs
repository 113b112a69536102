//! # Book Errors
//!
//! Every failure carries the HTTP status it maps to. The HTTP boundary
//! renders the message under that status and never picks one itself.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for book operations
pub type BookResult<T> = Result<T, BookError>;

/// Book operation errors
#[derive(Debug, Clone, Error)]
pub enum BookError {
    /// Missing or ill-typed fields in the request
    #[error("{0}")]
    Validation(String),

    /// Title already taken by another record
    #[error("{0}")]
    Conflict(String),

    /// No record with the requested id
    #[error("{0}")]
    NotFound(String),

    /// Collection could not be loaded or persisted
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BookError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        BookError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        BookError::NotFound(msg.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            BookError::Validation(_) => 400,
            BookError::Conflict(_) => 409,
            BookError::NotFound(_) => 404,
            BookError::Storage(e) => e.status_code(),
            BookError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookError::validation("x").status_code(), 400);
        assert_eq!(BookError::conflict("x").status_code(), 409);
        assert_eq!(BookError::not_found("x").status_code(), 404);
        assert_eq!(BookError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_storage_error_is_server_side() {
        let err = BookError::from(StoreError::io(Path::new("books.json"), "denied"));
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_message_is_verbatim() {
        assert_eq!(BookError::not_found("Book was not found").to_string(), "Book was not found");
    }
}
