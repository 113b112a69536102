//! # Book Service
//!
//! The five collection operations. Each one loads the whole collection from
//! the store, validates, mutates the in-memory copy and writes it back in
//! full. A failed operation never writes.
//!
//! Mutations are serialized within the process by `write_lock`. Reads take
//! no lock.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};

use super::errors::{BookError, BookResult};
use super::model::{Book, AUTHOR_FIELD, ID_FIELD, TITLE_FIELD};
use super::schema::{SchemaVariant, UpdatePolicy};
use super::validator::{self, BookValidator};
use crate::observability::{log_event_with_fields, Event};
use crate::store::BookStore;

/// Book collection operations over a store
#[derive(Debug)]
pub struct BookService<S: BookStore> {
    store: Arc<S>,
    validator: BookValidator,
    policy: UpdatePolicy,
    write_lock: Mutex<()>,
}

impl<S: BookStore> BookService<S> {
    pub fn new(store: S, schema: SchemaVariant, policy: UpdatePolicy) -> Self {
        Self::with_shared_store(Arc::new(store), schema, policy)
    }

    /// Build a service over a store the caller keeps a handle to
    pub fn with_shared_store(store: Arc<S>, schema: SchemaVariant, policy: UpdatePolicy) -> Self {
        Self {
            store,
            validator: BookValidator::new(schema),
            policy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn schema(&self) -> SchemaVariant {
        self.validator.schema()
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Every record, in stored order
    pub fn list(&self) -> BookResult<Vec<Book>> {
        Ok(self.store.read_all()?)
    }

    /// The first record with the given id
    pub fn get(&self, id: &str) -> BookResult<Book> {
        self.store
            .read_all()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BookError::not_found("Book was not found"))
    }

    /// Validate a payload, assign an id and append it to the collection.
    ///
    /// Only the schema's declared fields are kept from the payload.
    pub fn create(&self, payload: &Value) -> BookResult<Book> {
        let fields = self.validator.require_fields(payload)?;
        let title = validator::required_string(fields, TITLE_FIELD)?;
        let author = validator::required_string(fields, AUTHOR_FIELD)?;

        let _guard = self.lock()?;
        let mut books = self.store.read_all()?;
        validator::ensure_title_free(&books, &title)?;

        let book = Book::new(title, author, self.declared_attributes(fields));
        books.push(book.clone());
        self.store.write_all(&books)?;

        log_event_with_fields(
            Event::BookCreated,
            &[("id", book.id.as_str()), ("title", book.title.as_str())],
        );
        Ok(book)
    }

    /// Apply a payload to the record with the given id, per the update policy.
    pub fn update(&self, id: &str, payload: &Value) -> BookResult<Book> {
        let book = match self.policy {
            UpdatePolicy::StrictReplace => self.replace(id, payload)?,
            UpdatePolicy::PartialMerge => self.merge(id, payload)?,
        };

        log_event_with_fields(
            Event::BookUpdated,
            &[("id", book.id.as_str()), ("policy", self.policy.as_str())],
        );
        Ok(book)
    }

    /// Remove the first record with the given id and return it
    pub fn delete(&self, id: &str) -> BookResult<Book> {
        let _guard = self.lock()?;
        let mut books = self.store.read_all()?;

        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookError::not_found("Book was not found"))?;
        let removed = books.remove(index);
        self.store.write_all(&books)?;

        log_event_with_fields(Event::BookDeleted, &[("id", removed.id.as_str())]);
        Ok(removed)
    }

    fn replace(&self, id: &str, payload: &Value) -> BookResult<Book> {
        let fields = self.validator.require_fields(payload)?;
        let title = validator::required_string(fields, TITLE_FIELD)?;
        let author = validator::required_string(fields, AUTHOR_FIELD)?;

        let _guard = self.lock()?;
        let mut books = self.store.read_all()?;
        let index = find_index(&books, id)?;
        validator::ensure_title_free_for(&books, &title, id)?;

        let attributes = self.declared_attributes(fields);
        let updated = match books.get_mut(index) {
            Some(book) => {
                book.title = title;
                book.author = author;
                book.attributes.extend(attributes);
                book.clone()
            }
            None => return Err(BookError::Internal(format!("record {} vanished", id))),
        };

        self.store.write_all(&books)?;
        Ok(updated)
    }

    fn merge(&self, id: &str, payload: &Value) -> BookResult<Book> {
        let fields = payload
            .as_object()
            .ok_or_else(|| BookError::validation("Request body must be a JSON object"))?;
        let title = validator::string_field(fields, TITLE_FIELD)?;
        let author = validator::string_field(fields, AUTHOR_FIELD)?;

        let _guard = self.lock()?;
        let mut books = self.store.read_all()?;
        let index = find_index(&books, id)?;

        let updated = match books.get_mut(index) {
            Some(book) => {
                if let Some(title) = title {
                    book.title = title;
                }
                if let Some(author) = author {
                    book.author = author;
                }
                for (key, value) in fields {
                    if matches!(key.as_str(), ID_FIELD | TITLE_FIELD | AUTHOR_FIELD) {
                        continue;
                    }
                    book.attributes.insert(key.clone(), value.clone());
                }
                book.clone()
            }
            None => return Err(BookError::Internal(format!("record {} vanished", id))),
        };

        self.store.write_all(&books)?;
        Ok(updated)
    }

    /// Schema attributes other than title and author, copied from the payload
    fn declared_attributes(&self, fields: &Map<String, Value>) -> Map<String, Value> {
        self.validator
            .schema()
            .descriptive_fields()
            .filter_map(|name| fields.get(name).map(|v| (name.to_string(), v.clone())))
            .collect()
    }

    fn lock(&self) -> BookResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| BookError::Internal(format!("write lock poisoned: {}", e)))
    }
}

fn find_index(books: &[Book], id: &str) -> BookResult<usize> {
    books
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| BookError::not_found("Book was not found!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBookStore;
    use serde_json::json;

    fn classic(policy: UpdatePolicy) -> (Arc<InMemoryBookStore>, BookService<InMemoryBookStore>) {
        let store = Arc::new(InMemoryBookStore::new());
        let service = BookService::with_shared_store(store.clone(), SchemaVariant::Classic, policy);
        (store, service)
    }

    fn dune() -> Value {
        json!({"title": "Dune", "author": "Herbert", "year": 1965, "rating": 5})
    }

    #[test]
    fn test_create_assigns_id_and_persists() {
        let (store, service) = classic(UpdatePolicy::StrictReplace);

        let book = service.create(&dune()).unwrap();
        assert!(!book.id.is_empty());
        assert_eq!(book.field("year"), Some(json!(1965)));
        assert_eq!(store.read_all().unwrap(), vec![book]);
    }

    #[test]
    fn test_create_drops_undeclared_fields() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        let mut payload = dune();
        payload["id"] = json!("client-chosen");
        payload["publisher"] = json!("Chilton");

        let book = service.create(&payload).unwrap();
        assert_ne!(book.id, "client-chosen");
        assert_eq!(book.field("publisher"), None);
    }

    #[test]
    fn test_create_missing_field() {
        let (store, service) = classic(UpdatePolicy::StrictReplace);

        let err = service.create(&json!({"title": "Dune", "author": "Herbert"})).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_non_string_title() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);

        let err = service
            .create(&json!({"title": 7, "author": "Herbert", "year": 1965, "rating": 5}))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_create_duplicate_title() {
        let (store, service) = classic(UpdatePolicy::StrictReplace);
        service.create(&dune()).unwrap();

        let err = service.create(&dune()).unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        assert!(matches!(service.get("nope"), Err(BookError::NotFound(_))));
    }

    #[test]
    fn test_strict_update_keeps_id_and_extra_attributes() {
        let mut attributes = Map::new();
        attributes.insert("year".to_string(), json!(1965));
        attributes.insert("rating".to_string(), json!(4));
        attributes.insert("isbn".to_string(), json!("0441013597"));
        let existing = Book::new("Dune", "Herbert", attributes);
        let id = existing.id.clone();

        let store = Arc::new(InMemoryBookStore::with_books(vec![existing]));
        let service = BookService::with_shared_store(
            store.clone(),
            SchemaVariant::Classic,
            UpdatePolicy::StrictReplace,
        );

        let updated = service
            .update(&id, &json!({"title": "Dune Messiah", "author": "Herbert", "year": 1969, "rating": 3}))
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.field("year"), Some(json!(1969)));
        assert_eq!(updated.field("isbn"), Some(json!("0441013597")));
        assert_eq!(store.read_all().unwrap(), vec![updated]);
    }

    #[test]
    fn test_strict_update_requires_all_fields() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        let book = service.create(&dune()).unwrap();

        let err = service.update(&book.id, &json!({"title": "Dune"})).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_strict_update_title_taken_by_other() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        service.create(&dune()).unwrap();
        let emma = service
            .create(&json!({"title": "Emma", "author": "Austen", "year": 1815, "rating": 4}))
            .unwrap();

        let err = service.update(&emma.id, &dune()).unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_strict_update_same_title_allowed() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        let book = service.create(&dune()).unwrap();

        let mut payload = dune();
        payload["rating"] = json!(2);
        let updated = service.update(&book.id, &payload).unwrap();
        assert_eq!(updated.field("rating"), Some(json!(2)));
    }

    #[test]
    fn test_update_missing_id() {
        let (_store, service) = classic(UpdatePolicy::StrictReplace);
        assert_eq!(service.update("nope", &dune()).unwrap_err().status_code(), 404);

        let (_store, service) = classic(UpdatePolicy::PartialMerge);
        assert_eq!(
            service.update("nope", &json!({"rating": 1})).unwrap_err().status_code(),
            404
        );
    }

    #[test]
    fn test_partial_merge_leaves_unspecified_fields() {
        let (store, service) = classic(UpdatePolicy::PartialMerge);
        let book = service.create(&dune()).unwrap();

        let updated = service
            .update(&book.id, &json!({"id": "other", "rating": 3, "notes": "reread"}))
            .unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.field("year"), Some(json!(1965)));
        assert_eq!(updated.field("rating"), Some(json!(3)));
        assert_eq!(updated.field("notes"), Some(json!("reread")));
        assert_eq!(store.read_all().unwrap(), vec![updated]);
    }

    #[test]
    fn test_partial_merge_does_not_recheck_title() {
        let (_store, service) = classic(UpdatePolicy::PartialMerge);
        service.create(&dune()).unwrap();
        let emma = service
            .create(&json!({"title": "Emma", "author": "Austen", "year": 1815, "rating": 4}))
            .unwrap();

        let updated = service.update(&emma.id, &json!({"title": "Dune"})).unwrap();
        assert_eq!(updated.title, "Dune");
    }

    #[test]
    fn test_delete() {
        let (store, service) = classic(UpdatePolicy::StrictReplace);
        let book = service.create(&dune()).unwrap();

        let removed = service.delete(&book.id).unwrap();
        assert_eq!(removed, book);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_leaves_collection() {
        let (store, service) = classic(UpdatePolicy::StrictReplace);
        service.create(&dune()).unwrap();
        let before = store.read_all().unwrap();

        assert_eq!(service.delete("nope").unwrap_err().status_code(), 404);
        assert_eq!(store.read_all().unwrap(), before);
    }

    #[test]
    fn test_catalog_schema() {
        let service = BookService::new(
            InMemoryBookStore::new(),
            SchemaVariant::Catalog,
            UpdatePolicy::PartialMerge,
        );

        let err = service.create(&dune()).unwrap_err();
        assert!(err.to_string().contains("readingProgress"));

        let book = service
            .create(&json!({
                "title": "Dune",
                "author": "Herbert",
                "genre": "Sci-Fi",
                "pages": 412,
                "publishedIn": 1965,
                "reviews": ["classic"],
                "description": "Spice",
                "coverImage": "dune.png",
                "price": 9.99,
                "averageRating": 4.6,
                "readingProgress": 10
            }))
            .unwrap();
        assert_eq!(book.attributes.len(), 9);
    }
}
