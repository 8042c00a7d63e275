//! Date ordering of entries.
//!
//! Sorting never touches the store: it returns a fresh `Vec` of references in
//! the requested order. Entries without a parseable date always sort after
//! every dated entry, in either direction, and keep their relative order.

use crate::entry::Entry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction of the date sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Text of the sort toggle control, e.g. `Sort (desc)`.
    pub fn button_label(self) -> String {
        format!("Sort ({})", self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly `asc` means ascending; anything else, including `ASC`, is descending.
impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        })
    }
}

/// Return `entries` ordered by date in the given direction.
pub fn sort<'a, I>(entries: I, order: SortOrder) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut keyed: Vec<(Option<i64>, &Entry)> =
        entries.into_iter().map(|e| (e.timestamp(), e)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare(*a, *b, order));
    keyed.into_iter().map(|(_, e)| e).collect()
}

fn compare(a: Option<i64>, b: Option<i64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn default_order_is_desc() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn toggle_flips_both_ways() {
        assert_eq!(SortOrder::Desc.toggle(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.toggle(), SortOrder::Desc);
    }

    #[test]
    fn parse_falls_back_to_desc() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(" asc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("asc ".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    }

    #[test]
    fn button_label_names_order() {
        assert_eq!(SortOrder::Desc.button_label(), "Sort (desc)");
        assert_eq!(SortOrder::Asc.button_label(), "Sort (asc)");
    }

    #[test]
    fn desc_is_non_increasing() {
        let store = mixed_store();
        let sorted = sort(&store, SortOrder::Desc);
        let stamps: Vec<i64> = sorted.iter().filter_map(|e| e.timestamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]), "{stamps:?}");
    }

    #[test]
    fn asc_is_non_decreasing() {
        let store = mixed_store();
        let sorted = sort(&store, SortOrder::Asc);
        let stamps: Vec<i64> = sorted.iter().filter_map(|e| e.timestamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "{stamps:?}");
    }

    #[test]
    fn sort_is_a_permutation() {
        let store = mixed_store();
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sorted = sort(&store, order);
            assert_eq!(sorted.len(), store.len());
            for entry in store.iter() {
                let expected = store.iter().filter(|e| *e == entry).count();
                let actual = sorted.iter().filter(|e| **e == entry).count();
                assert_eq!(expected, actual);
            }
        }
    }

    #[test]
    fn sort_does_not_touch_store() {
        let store = mixed_store();
        let before: Vec<Entry> = store.entries().to_vec();
        let _ = sort(&store, SortOrder::Asc);
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn undated_entries_sort_last_in_both_orders() {
        let store = store_of(vec![
            titled("bad", "not a date", "tech"),
            titled("new", "2022-05-01", "tech"),
            titled("none", "", "tech"),
            titled("old", "2022-03-20", "tech"),
        ]);
        assert_eq!(
            titles(&sort(&store, SortOrder::Desc)),
            vec!["new", "old", "bad", "none"]
        );
        assert_eq!(
            titles(&sort(&store, SortOrder::Asc)),
            vec!["old", "new", "bad", "none"]
        );
    }

    #[test]
    fn equal_dates_keep_store_order() {
        let store = store_of(vec![
            titled("first", "2022-04-01", ""),
            titled("second", "2022-04-01", ""),
        ]);
        assert_eq!(
            titles(&sort(&store, SortOrder::Desc)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn time_of_day_breaks_same_day_ties() {
        let store = store_of(vec![
            titled("morning", "2022-04-01T08:00", ""),
            titled("evening", "2022-04-01T20:00", ""),
        ]);
        assert_eq!(
            titles(&sort(&store, SortOrder::Desc)),
            vec!["evening", "morning"]
        );
    }
}
