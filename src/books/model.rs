//! Book record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Fields every record carries regardless of schema variant
pub const ID_FIELD: &str = "id";
pub const TITLE_FIELD: &str = "title";
pub const AUTHOR_FIELD: &str = "author";

/// A single book entry.
///
/// `id`, `title` and `author` are typed; every other descriptive attribute
/// (year, rating, genre, price, ...) lives in `attributes` and is flattened
/// into the same JSON object on the wire and on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Book {
    /// Build a record with a freshly generated identifier
    pub fn new(title: impl Into<String>, author: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            attributes,
        }
    }

    /// Look up a field by its wire name
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            ID_FIELD => Some(Value::String(self.id.clone())),
            TITLE_FIELD => Some(Value::String(self.title.clone())),
            AUTHOR_FIELD => Some(Value::String(self.author.clone())),
            other => self.attributes.get(other).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_are_flattened() {
        let mut attributes = Map::new();
        attributes.insert("year".to_string(), json!(2000));
        let book = Book {
            id: "b1".to_string(),
            title: "A".to_string(),
            author: "B".to_string(),
            attributes,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value, json!({"id": "b1", "title": "A", "author": "B", "year": 2000}));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let book: Book = serde_json::from_value(json!({
            "id": "b1",
            "title": "A",
            "author": "B",
            "coverImage": "a.png",
            "reviews": ["good"]
        }))
        .unwrap();

        assert_eq!(book.field("coverImage"), Some(json!("a.png")));
        assert_eq!(book.field("reviews"), Some(json!(["good"])));
        assert_eq!(book.field("title"), Some(json!("A")));
        assert_eq!(book.field("missing"), None);
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = Book::new("A", "B", Map::new());
        let b = Book::new("A", "B", Map::new());
        assert_ne!(a.id, b.id);
    }
}
