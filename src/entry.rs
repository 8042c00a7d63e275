//! The entry store: blog posts loaded once from a JSON dataset.
//!
//! The dataset is a JSON array of post objects. Every field is optional:
//!
//! ```json
//! [
//!   { "title": "Hello", "date": "2022-04-01", "content": "...", "category": "tech" },
//!   { "date": "2022-03-20", "category": "" }
//! ]
//! ```
//!
//! Unknown keys are ignored so datasets exported by other tools load as-is.
//! Once built, an [`EntryStore`] is never mutated; the pipeline only ever
//! borrows from it.

use crate::date;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single blog post record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub title: Option<String>,
    /// Raw date string as found in the dataset.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Raw category; empty or missing means the `other` group.
    #[serde(default)]
    pub category: Option<String>,
}

impl Entry {
    /// Milliseconds since the epoch, or `None` if the date is missing or unparseable.
    pub fn timestamp(&self) -> Option<i64> {
        self.date.as_deref().and_then(date::parse_timestamp)
    }

    /// The raw category text, empty when absent.
    pub fn raw_category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

/// Immutable, ordered collection of every loaded entry.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        let store = Self { entries };
        for entry in store.undated() {
            tracing::warn!(
                title = entry.title.as_deref().unwrap_or(""),
                date = entry.date.as_deref().unwrap_or(""),
                "entry has no parseable date and will be hidden by the range filter"
            );
        }
        store
    }

    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load the dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EntryError> {
        let content = fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), count = store.len(), "loaded entries");
        Ok(store)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose date is missing or cannot be parsed.
    pub fn undated(&self) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp().is_none())
            .collect()
    }
}

impl From<Vec<Entry>> for EntryStore {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
