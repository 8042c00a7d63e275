//! Category grouping and filtering.
//!
//! Categories come straight from the dataset. Entries with an empty or
//! missing category are grouped under the sentinel [`OTHER`]. The checkbox
//! id for a category is `category-<name>`, derived from the raw text with no
//! escaping, so two raw values can land on the same id. The only way that
//! happens is a literal `"other"` category next to uncategorised entries;
//! [`id_collisions`] reports it and the two groups share one checkbox.

use crate::entry::Entry;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Group for entries with an empty or missing category.
pub const OTHER: &str = "other";

/// Effective category of an entry, after the `other` substitution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(raw: &str) -> Self {
        if raw.is_empty() {
            Self(OTHER.to_string())
        } else {
            Self(raw.to_string())
        }
    }

    pub fn of(entry: &Entry) -> Self {
        Self::new(entry.raw_category())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_other(&self) -> bool {
        self.0 == OTHER
    }

    /// DOM id of the category's checkbox.
    pub fn checkbox_id(&self) -> String {
        format!("category-{}", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One checkbox + label pair in the category form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryControl {
    pub id: String,
    pub value: CategoryId,
    pub checked: bool,
}

/// Distinct raw category values that share one checkbox id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCollision {
    pub id: CategoryId,
    pub raw: Vec<String>,
}

/// Distinct effective categories in first-seen order.
pub fn distinct_categories<'a, I>(entries: I) -> Vec<CategoryId>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut seen = BTreeSet::new();
    let mut categories = Vec::new();
    for entry in entries {
        let id = CategoryId::of(entry);
        if seen.insert(id.clone()) {
            categories.push(id);
        }
    }
    categories
}

/// Entry count per effective category, in first-seen order.
pub fn category_counts<'a, I>(entries: I) -> Vec<(CategoryId, usize)>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut counts: Vec<(CategoryId, usize)> = Vec::new();
    for entry in entries {
        let id = CategoryId::of(entry);
        match counts.iter_mut().find(|(c, _)| *c == id) {
            Some((_, n)) => *n += 1,
            None => counts.push((id, 1)),
        }
    }
    counts
}

/// Report every checkbox id claimed by more than one raw category value.
///
/// Empty and missing categories count as the same raw value.
pub fn id_collisions<'a, I>(entries: I) -> Vec<CategoryCollision>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut by_id: BTreeMap<CategoryId, BTreeSet<String>> = BTreeMap::new();
    for entry in entries {
        by_id
            .entry(CategoryId::of(entry))
            .or_default()
            .insert(entry.raw_category().to_string());
    }
    by_id
        .into_iter()
        .filter(|(_, raw)| raw.len() > 1)
        .map(|(id, raw)| CategoryCollision {
            id,
            raw: raw.into_iter().collect(),
        })
        .collect()
}

/// Checkbox controls for the given categories, checked per `selected`.
pub fn controls(
    categories: &[CategoryId],
    selected: &BTreeSet<CategoryId>,
) -> Vec<CategoryControl> {
    categories
        .iter()
        .map(|c| CategoryControl {
            id: c.checkbox_id(),
            value: c.clone(),
            checked: selected.contains(c),
        })
        .collect()
}

/// Keep entries whose effective category is in `selected`.
pub fn filter_categories<'a, I>(entries: I, selected: &BTreeSet<CategoryId>) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|e| selected.contains(&CategoryId::of(e)))
        .collect()
}
