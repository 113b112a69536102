//! # In-Memory Backend

use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::BookStore;
use crate::books::Book;

/// In-memory book store for testing
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing collection
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

impl BookStore for InMemoryBookStore {
    fn read_all(&self) -> StoreResult<Vec<Book>> {
        self.books
            .read()
            .map(|books| books.clone())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write_all(&self, books: &[Book]) -> StoreResult<()> {
        let mut stored = self
            .books
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *stored = books.to_vec();
        Ok(())
    }
}
