//! Book HTTP Routes
//!
//! Mounted under a base path (`/api/v1/books`):
//!
//! | Method | Path          | Success                  |
//! |--------|---------------|--------------------------|
//! | GET    | base or base/ | 200, array of books      |
//! | GET    | `base/:id`    | 200, book                |
//! | POST   | base or base/ | 201, created book        |
//! | PUT    | `base/:id`    | 200, updated book        |
//! | DELETE | `base/:id`    | 200, confirmation text   |
//!
//! `BookService` does blocking file I/O, so every call runs on tokio's
//! blocking pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::body_error;
use crate::books::{Book, BookError, BookResult, BookService};
use crate::store::BookStore;

/// Shared state type
type BooksState<S> = Arc<BookService<S>>;

/// Create book routes under `base`
pub fn book_routes<S: BookStore + 'static>(base: &str, service: Arc<BookService<S>>) -> Router {
    let base = base.trim_end_matches('/');
    let collection = get(list_handler::<S>).post(create_handler::<S>);

    Router::new()
        .route(base, collection.clone())
        .route(&format!("{}/", base), collection)
        .route(
            &format!("{}/:id", base),
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

/// Run a service call on the blocking pool
async fn blocking<T, F>(f: F) -> BookResult<T>
where
    F: FnOnce() -> BookResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BookError::Internal(format!("blocking task failed: {}", e)))?
}

/// List books handler
async fn list_handler<S: BookStore + 'static>(
    State(service): State<BooksState<S>>,
) -> Result<Json<Vec<Book>>, BookError> {
    let books = blocking(move || service.list()).await?;
    Ok(Json(books))
}

/// Get single book handler
async fn get_handler<S: BookStore + 'static>(
    State(service): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, BookError> {
    let book = blocking(move || service.get(&id)).await?;
    Ok(Json(book))
}

/// Create book handler
async fn create_handler<S: BookStore + 'static>(
    State(service): State<BooksState<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), BookError> {
    let Json(body) = payload.map_err(body_error)?;

    let book = blocking(move || service.create(&body)).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update book handler
async fn update_handler<S: BookStore + 'static>(
    State(service): State<BooksState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Book>, BookError> {
    let Json(body) = payload.map_err(body_error)?;

    let book = blocking(move || service.update(&id, &body)).await?;
    Ok(Json(book))
}

/// Delete book handler
async fn delete_handler<S: BookStore + 'static>(
    State(service): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Result<String, BookError> {
    let removed = blocking(move || service.delete(&id)).await?;
    Ok(format!("Book with the id of {} was deleted!", removed.id))
}
