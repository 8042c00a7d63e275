//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Filters
//!     Sort: desc
//!     Range: 2022-03-15 .. 2024-05-01
//!     Categories: tech, other
//!
//! Entries
//! 001 2022-04-01 Rust tips [tech]
//! 002 2022-03-20 Spring walk [other]
//! ```
//!
//! ## Categories
//!
//! ```text
//! Categories
//! 001 tech (1 entries) → category-tech
//! 002 other (1 entries) → category-other
//! ```

use crate::category::{CategoryCollision, CategoryId};
use crate::config::LabelsConfig;
use crate::entry::{Entry, EntryStore};
use crate::pipeline::{Event, FilterState, Outcome};
use crate::range::RangeField;
use crate::surface::Panel;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Render
// ============================================================================

/// Current filter state, one setting per line.
pub fn format_filters(state: &FilterState, categories: &[CategoryId]) -> Vec<String> {
    let checked: Vec<&str> = categories
        .iter()
        .filter(|c| state.selected_categories.contains(*c))
        .map(|c| c.as_str())
        .collect();
    let checked = if checked.is_empty() {
        "(none)".to_string()
    } else {
        checked.join(", ")
    };
    vec![
        "Filters".to_string(),
        format!("    Sort: {}", state.sorting_order),
        format!("    Range: {}", state.range.committed()),
        format!("    Categories: {}", checked),
    ]
}

/// One line per visible entry, or the no-data text.
pub fn format_entries(entries: &[&Entry], labels: &LabelsConfig, today: &str) -> Vec<String> {
    let mut lines = vec!["Entries".to_string()];
    if entries.is_empty() {
        lines.push(format!("    {}", labels.no_data));
        return lines;
    }
    for (i, entry) in entries.iter().enumerate() {
        let title = entry
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&labels.default_title);
        let date = entry
            .date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(today);
        lines.push(format!(
            "{} {} {} [{}]",
            format_index(i + 1),
            date,
            title,
            CategoryId::of(entry)
        ));
    }
    lines
}

pub fn format_render_output(
    state: &FilterState,
    categories: &[CategoryId],
    entries: &[&Entry],
    labels: &LabelsConfig,
    today: &str,
) -> Vec<String> {
    let mut lines = format_filters(state, categories);
    lines.push(String::new());
    lines.extend(format_entries(entries, labels, today));
    lines
}

/// Print render output to stdout.
pub fn print_render_output(
    state: &FilterState,
    categories: &[CategoryId],
    entries: &[&Entry],
    labels: &LabelsConfig,
    today: &str,
) {
    for line in format_render_output(state, categories, entries, labels, today) {
        println!("{}", line);
    }
}

// ============================================================================
// Categories
// ============================================================================

pub fn format_categories(
    counts: &[(CategoryId, usize)],
    collisions: &[CategoryCollision],
) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];
    for (i, (category, count)) in counts.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} entries) \u{2192} {}",
            format_index(i + 1),
            category,
            count,
            category.checkbox_id()
        ));
    }
    lines.extend(format_collisions(collisions));
    lines
}

fn format_collisions(collisions: &[CategoryCollision]) -> Vec<String> {
    if collisions.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Collisions".to_string()];
    for collision in collisions {
        let raw: Vec<String> = collision.raw.iter().map(|r| format!("{r:?}")).collect();
        lines.push(format!(
            "    {} \u{2190} {}",
            collision.id.checkbox_id(),
            raw.join(", ")
        ));
    }
    lines
}

pub fn print_categories(counts: &[(CategoryId, usize)], collisions: &[CategoryCollision]) {
    for line in format_categories(counts, collisions) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Dataset summary: entry count, undated entries, category collisions.
pub fn format_check_output(store: &EntryStore, collisions: &[CategoryCollision]) -> Vec<String> {
    let mut lines = vec![format!("{} entries", store.len())];
    let undated = store.undated();
    if !undated.is_empty() {
        lines.push(String::new());
        lines.push("Undated (hidden by the range filter)".to_string());
        for entry in undated {
            lines.push(format!(
                "    {} ({:?})",
                entry.title.as_deref().unwrap_or("(untitled)"),
                entry.date.as_deref().unwrap_or("")
            ));
        }
    }
    lines.extend(format_collisions(collisions));
    lines
}

pub fn print_check_output(store: &EntryStore, collisions: &[CategoryCollision]) {
    for line in format_check_output(store, collisions) {
        println!("{}", line);
    }
}

// ============================================================================
// Session
// ============================================================================

fn describe_event(event: &Event) -> String {
    match event {
        Event::CategoryChanged { category, checked } => {
            let verb = if *checked { "check" } else { "uncheck" };
            format!("{verb} {category}")
        }
        Event::RangeChanged { field, value } => match field {
            RangeField::Start => format!("start {value}"),
            RangeField::Finish => format!("finish {value}"),
        },
        Event::SortToggled => "sort".to_string(),
        Event::PanelToggled(Panel::Categories) => "toggle categories".to_string(),
        Event::PanelToggled(Panel::Range) => "toggle range".to_string(),
    }
}

/// One line per handled event; rejected range changes show the alert text.
pub fn format_outcome(event: &Event, outcome: &Outcome, alert: &str) -> String {
    let described = describe_event(event);
    match outcome {
        Outcome::Rendered(n) => format!("{described} \u{2192} {n} entries"),
        Outcome::Rejected(err) => format!("{described} \u{2192} {alert} ({err})"),
        Outcome::PanelToggled(_) => format!("{described} \u{2192} panel toggled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{DateRange, RangeError};
    use crate::test_helpers::*;

    fn state(categories: &[CategoryId]) -> FilterState {
        FilterState::new(categories, DateRange::new("2022-03-15", "2022-12-31").unwrap())
    }

    #[test]
    fn filters_list_state() {
        let categories = vec![CategoryId::new("tech"), CategoryId::new("")];
        let mut state = state(&categories);
        state.selected_categories.remove("tech");
        let lines = format_filters(&state, &categories);
        assert_eq!(
            lines,
            vec![
                "Filters",
                "    Sort: desc",
                "    Range: 2022-03-15 .. 2022-12-31",
                "    Categories: other",
            ]
        );
    }

    #[test]
    fn filters_show_none_when_nothing_checked() {
        let categories = vec![CategoryId::new("tech")];
        let mut state = state(&categories);
        state.selected_categories.clear();
        let lines = format_filters(&state, &categories);
        assert_eq!(lines[3], "    Categories: (none)");
    }

    #[test]
    fn entries_are_indexed_with_category() {
        let store = example_store();
        let entries: Vec<&Entry> = store.iter().collect();
        let lines = format_entries(&entries, &LabelsConfig::default(), "2030-01-01");
        assert_eq!(
            lines,
            vec![
                "Entries",
                "001 2022-04-01 Rust tips [tech]",
                "002 2022-03-20 Spring walk [other]",
            ]
        );
    }

    #[test]
    fn entries_use_defaults() {
        let e = Entry::default();
        let lines = format_entries(&[&e], &LabelsConfig::default(), "2030-01-01");
        assert_eq!(lines[1], "001 2030-01-01 Blog post [other]");
    }

    #[test]
    fn empty_entries_show_no_data() {
        let lines = format_entries(&[], &LabelsConfig::default(), "2030-01-01");
        assert_eq!(lines, vec!["Entries", "    No data to show! :("]);
    }

    #[test]
    fn categories_with_counts_and_ids() {
        let counts = vec![(CategoryId::new("tech"), 3), (CategoryId::new(""), 1)];
        let lines = format_categories(&counts, &[]);
        assert_eq!(lines[1], "001 tech (3 entries) \u{2192} category-tech");
        assert_eq!(lines[2], "002 other (1 entries) \u{2192} category-other");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn categories_list_collisions() {
        let collisions = vec![CategoryCollision {
            id: CategoryId::new("other"),
            raw: vec![String::new(), "other".to_string()],
        }];
        let lines = format_categories(&[], &collisions);
        assert!(lines.contains(&"Collisions".to_string()));
        assert!(lines.contains(&"    category-other \u{2190} \"\", \"other\"".to_string()));
    }

    #[test]
    fn check_reports_undated() {
        let store = store_of(vec![
            titled("ok", "2022-04-01", ""),
            titled("bad", "soon", ""),
        ]);
        let lines = format_check_output(&store, &[]);
        assert_eq!(lines[0], "2 entries");
        assert!(lines.contains(&"    bad (\"soon\")".to_string()));
    }

    #[test]
    fn outcome_lines() {
        let alert = "Invalid date range!";
        assert_eq!(
            format_outcome(&Event::SortToggled, &Outcome::Rendered(2), alert),
            "sort \u{2192} 2 entries"
        );
        let event = Event::RangeChanged {
            field: RangeField::Finish,
            value: "2022-03-01".into(),
        };
        let err = RangeError::StartAfterFinish {
            start: "2022-03-15".into(),
            finish: "2022-03-01".into(),
        };
        let line = format_outcome(&event, &Outcome::Rejected(err), alert);
        assert!(line.starts_with("finish 2022-03-01 \u{2192} Invalid date range!"));
        assert_eq!(
            format_outcome(
                &Event::PanelToggled(Panel::Range),
                &Outcome::PanelToggled(Panel::Range),
                alert
            ),
            "toggle range \u{2192} panel toggled"
        );
    }
}
