//! # Book Store
//!
//! Persistence for the book collection. The whole collection is read into
//! memory, mutated by the caller, and written back in full.
//!
//! Two backends implement [`BookStore`]:
//! - [`FileBookStore`] keeps the collection in a single JSON file
//! - [`InMemoryBookStore`] keeps it in process memory (tests)

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FileBookStore;
pub use memory::InMemoryBookStore;

use crate::books::Book;

/// Backend trait for the book collection
pub trait BookStore: Send + Sync + std::fmt::Debug {
    /// Load every record, in stored order. Absent storage is an empty collection.
    fn read_all(&self) -> StoreResult<Vec<Book>>;

    /// Replace the stored collection with `books`
    fn write_all(&self, books: &[Book]) -> StoreResult<()>;
}
