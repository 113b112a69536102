//! Book validation
//!
//! Two checks guard every write:
//! - required fields are present and truthy
//! - a title is held by at most one record (exact, case-sensitive match)
//!
//! Truthiness: `null`, `false`, `0`, `NaN` and `""` are empty. Arrays and
//! objects always count as present.

use serde_json::{Map, Value};

use super::errors::{BookError, BookResult};
use super::model::Book;
use super::schema::SchemaVariant;

/// Validator for one schema variant.
///
/// Validation does not mutate payloads.
#[derive(Debug, Clone, Copy)]
pub struct BookValidator {
    schema: SchemaVariant,
}

impl BookValidator {
    pub fn new(schema: SchemaVariant) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> SchemaVariant {
        self.schema
    }

    /// Require a JSON object carrying every mandatory field.
    ///
    /// # Errors
    ///
    /// `BookError::Validation` naming the full field list when the payload
    /// is not an object or any mandatory field is missing or empty.
    pub fn require_fields<'a>(&self, payload: &'a Value) -> BookResult<&'a Map<String, Value>> {
        let fields = payload.as_object().ok_or_else(|| self.missing_error())?;

        if !self.missing_fields(fields).is_empty() {
            return Err(self.missing_error());
        }

        Ok(fields)
    }

    /// Mandatory fields absent or empty in `fields`, in declaration order
    pub fn missing_fields(&self, fields: &Map<String, Value>) -> Vec<&'static str> {
        self.schema
            .required_fields()
            .iter()
            .copied()
            .filter(|name| !fields.get(*name).is_some_and(is_truthy))
            .collect()
    }

    fn missing_error(&self) -> BookError {
        BookError::validation(format!(
            "All fields ({}) are required",
            self.schema.required_fields().join(", ")
        ))
    }
}

/// Whether a JSON value counts as provided
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read an optional string field.
///
/// # Errors
///
/// `BookError::Validation` if the field is present but not a string.
pub fn string_field(fields: &Map<String, Value>, name: &str) -> BookResult<Option<String>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(BookError::validation(format!("Field '{}' must be a string", name))),
    }
}

/// Read a string field that `require_fields` already proved present.
pub fn required_string(fields: &Map<String, Value>, name: &str) -> BookResult<String> {
    string_field(fields, name)?
        .ok_or_else(|| BookError::validation(format!("Field '{}' is required", name)))
}

/// Reject a new title already held by any record.
pub fn ensure_title_free(books: &[Book], title: &str) -> BookResult<()> {
    if books.iter().any(|b| b.title == title) {
        return Err(BookError::conflict("A book with the same title already exists"));
    }
    Ok(())
}

/// Reject a title held by a record other than `id`.
pub fn ensure_title_free_for(books: &[Book], title: &str, id: &str) -> BookResult<()> {
    if books.iter().any(|b| b.title == title && b.id != id) {
        return Err(BookError::conflict(
            "Cannot edit book, a book with such title already exists!",
        ));
    }
    Ok(())
}
