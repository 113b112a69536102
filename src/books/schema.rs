//! Deployment-level policy: which fields a book must carry and how updates
//! are applied. Both are fixed per deployment through configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{AUTHOR_FIELD, TITLE_FIELD};

const CLASSIC_FIELDS: &[&str] = &[TITLE_FIELD, AUTHOR_FIELD, "year", "rating"];

const CATALOG_FIELDS: &[&str] = &[
    TITLE_FIELD,
    AUTHOR_FIELD,
    "genre",
    "pages",
    "publishedIn",
    "reviews",
    "description",
    "coverImage",
    "price",
    "averageRating",
    "readingProgress",
];

/// Field set a deployment requires on every book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// title, author, year, rating
    #[default]
    Classic,
    /// title, author and nine catalogue attributes
    Catalog,
}

impl SchemaVariant {
    /// Every mandatory field, in declaration order
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SchemaVariant::Classic => CLASSIC_FIELDS,
            SchemaVariant::Catalog => CATALOG_FIELDS,
        }
    }

    /// Mandatory fields other than title and author
    pub fn descriptive_fields(&self) -> impl Iterator<Item = &'static str> {
        self.required_fields()
            .iter()
            .copied()
            .filter(|f| *f != TITLE_FIELD && *f != AUTHOR_FIELD)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Classic => "classic",
            SchemaVariant::Catalog => "catalog",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How PUT applies a payload to an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// All required fields must be sent; title uniqueness is re-checked
    #[default]
    StrictReplace,
    /// Any subset of fields is merged over the record; title is not re-checked
    PartialMerge,
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::StrictReplace => "strict_replace",
            UpdatePolicy::PartialMerge => "partial_merge",
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
