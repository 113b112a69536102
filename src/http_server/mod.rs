//! # bookshelf HTTP Server Module
//!
//! Axum server exposing the book collection.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/books` - Book CRUD

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod request_log;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use errors::ErrorResponse;
pub use server::{build_router, HttpServer, BOOKS_BASE_PATH};
