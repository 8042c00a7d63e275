//! Shared test utilities: entry builders, small fixture stores and
//! extractors for asserting on pipeline output.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = example_store();
//! let visible = sort(&store, SortOrder::Desc);
//! assert_eq!(dates(&visible), vec!["2022-04-01", "2022-03-20"]);
//! ```

use crate::entry::{Entry, EntryStore};

// =========================================================================
// Entry builders
// =========================================================================

/// An untitled entry with the given date and raw category.
///
/// An empty `date` leaves the date missing; the category is kept verbatim,
/// so `""` models the dataset's blank category.
pub fn entry(date: &str, category: &str) -> Entry {
    Entry {
        title: None,
        date: (!date.is_empty()).then(|| date.to_string()),
        content: None,
        category: Some(category.to_string()),
    }
}

/// Same as [`entry`] with a title.
pub fn titled(title: &str, date: &str, category: &str) -> Entry {
    Entry {
        title: Some(title.to_string()),
        ..entry(date, category)
    }
}

pub fn store_of(entries: Vec<Entry>) -> EntryStore {
    EntryStore::new(entries)
}

// =========================================================================
// Fixture stores
// =========================================================================

/// Two entries: a `tech` post and an uncategorised one, both after
/// the default earliest date.
pub fn example_store() -> EntryStore {
    store_of(vec![
        titled("Rust tips", "2022-04-01", "tech"),
        titled("Spring walk", "2022-03-20", ""),
    ])
}

/// A mix of categories, duplicate dates, a date-time and an undated entry,
/// in no particular order.
pub fn mixed_store() -> EntryStore {
    store_of(vec![
        titled("b", "2022-05-10", "tech"),
        titled("a", "2022-03-16", "life"),
        titled("d", "2022-06-01T12:30:00", ""),
        titled("c", "2022-05-10", "tech"),
        titled("e", "2021-12-31", "travel"),
        titled("f", "whenever", "life"),
        titled("g", "2022-04-15", "travel"),
    ])
}

// =========================================================================
// Extractors
// =========================================================================

/// Titles in order; panics on untitled entries.
pub fn titles<'a>(entries: &[&'a Entry]) -> Vec<&'a str> {
    entries
        .iter()
        .map(|e| {
            e.title
                .as_deref()
                .unwrap_or_else(|| panic!("untitled entry in {entries:?}"))
        })
        .collect()
}

/// Raw dates in order; missing dates show as `""`.
pub fn dates<'a>(entries: &[&'a Entry]) -> Vec<&'a str> {
    entries
        .iter()
        .map(|e| e.date.as_deref().unwrap_or(""))
        .collect()
}
