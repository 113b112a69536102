//! # Books
//!
//! The book record, its validation rules, and the collection operations
//! (list, get, create, update, delete) served over HTTP.

pub mod errors;
pub mod model;
pub mod schema;
pub mod service;
pub mod validator;

pub use errors::{BookError, BookResult};
pub use model::Book;
pub use schema::{SchemaVariant, UpdatePolicy};
pub use service::BookService;
pub use validator::BookValidator;
