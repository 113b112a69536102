//! # JSON File Backend
//!
//! The collection lives in one file holding a JSON array of records.
//!
//! Writes go through a sibling temp file:
//! 1. Write to `<file>.tmp`
//! 2. fsync the temp file
//! 3. Rename over the target
//!
//! so a concurrent reader sees either the old or the new collection.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::BookStore;
use crate::books::Book;

/// File-backed book store
#[derive(Debug, Clone)]
pub struct FileBookStore {
    path: PathBuf,
    temp_path: PathBuf,
}

impl FileBookStore {
    /// Create a store for the given file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut temp_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "books.json".into());
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        Self { path, temp_path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file holding an empty collection.
    ///
    /// Fails if the file already exists.
    pub fn initialize(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Err(StoreError::io(&self.path, "file already exists"));
        }
        self.write_all(&[])
    }
}

impl BookStore for FileBookStore {
    fn read_all(&self) -> StoreResult<Vec<Book>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::malformed(&self.path, e))
    }

    fn write_all(&self, books: &[Book]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        // Two-space pretty JSON, no trailing newline, field order as read
        let content =
            serde_json::to_string_pretty(books).map_err(|e| StoreError::malformed(&self.path, e))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| StoreError::io(&self.temp_path, e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| StoreError::io(&self.temp_path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io(&self.temp_path, e))?;

        fs::rename(&self.temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        // Best effort: make the rename itself durable
        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}
