//! The seam between the filter pipeline and whatever displays it.
//!
//! The orchestrator never touches a document directly. It drives a
//! [`Surface`]: replace the entry list, relabel the sort button, write a range
//! input, toggle a panel, raise a blocking alert. [`HtmlSurface`] is the
//! implementation used by the CLI and the tests; it records every call so the
//! resulting state can be inspected or written out as a page.

use crate::config::LabelsConfig;
use crate::entry::Entry;
use crate::range::RangeField;
use crate::render;
use std::fmt;

/// The two collapsible filter panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Categories,
    Range,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Categories => f.write_str("categories"),
            Panel::Range => f.write_str("range"),
        }
    }
}

/// Visibility of the filter panels. Both start collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelVisibility {
    pub categories: bool,
    pub range: bool,
}

impl PanelVisibility {
    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Categories => self.categories,
            Panel::Range => self.range,
        }
    }

    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::Categories => self.categories = !self.categories,
            Panel::Range => self.range = !self.range,
        }
    }
}

/// UI operations the orchestrator needs.
pub trait Surface {
    /// Discard the current entry list and show `entries` in this order.
    fn render_entries(&mut self, entries: &[&Entry]);
    fn set_sort_label(&mut self, label: &str);
    /// Write the value of one range input.
    fn set_range_value(&mut self, field: RangeField, value: &str);
    fn toggle_panel(&mut self, panel: Panel);
    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}

/// A surface that renders to HTML and remembers its state.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    labels: LabelsConfig,
    today: String,
    entries_html: String,
    entry_count: usize,
    render_passes: usize,
    sort_label: String,
    range_start: String,
    range_finish: String,
    panels: PanelVisibility,
    alerts: Vec<String>,
}

impl HtmlSurface {
    /// `today` is shown for entries without a date.
    pub fn new(labels: LabelsConfig, today: String) -> Self {
        Self {
            labels,
            today,
            entries_html: String::new(),
            entry_count: 0,
            render_passes: 0,
            sort_label: String::new(),
            range_start: String::new(),
            range_finish: String::new(),
            panels: PanelVisibility::default(),
            alerts: Vec::new(),
        }
    }

    /// Markup currently inside the entry container.
    pub fn entries_html(&self) -> &str {
        &self.entries_html
    }

    /// Number of entries in the last render, 0 when the placeholder is shown.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn render_passes(&self) -> usize {
        self.render_passes
    }

    pub fn sort_label(&self) -> &str {
        &self.sort_label
    }

    pub fn range_value(&self, field: RangeField) -> &str {
        match field {
            RangeField::Start => &self.range_start,
            RangeField::Finish => &self.range_finish,
        }
    }

    pub fn panels(&self) -> PanelVisibility {
        self.panels
    }

    /// Every alert raised so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Surface for HtmlSurface {
    fn render_entries(&mut self, entries: &[&Entry]) {
        self.entries_html =
            render::render_entries(entries, &self.labels, &self.today).into_string();
        self.entry_count = entries.len();
        self.render_passes += 1;
    }

    fn set_sort_label(&mut self, label: &str) {
        self.sort_label = label.to_string();
    }

    fn set_range_value(&mut self, field: RangeField, value: &str) {
        match field {
            RangeField::Start => self.range_start = value.to_string(),
            RangeField::Finish => self.range_finish = value.to_string(),
        }
    }

    fn toggle_panel(&mut self, panel: Panel) {
        self.panels.toggle(panel);
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(%message, "alert");
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn surface() -> HtmlSurface {
        HtmlSurface::new(LabelsConfig::default(), "2030-01-01".to_string())
    }

    #[test]
    fn panels_start_collapsed_and_toggle() {
        let mut panels = PanelVisibility::default();
        assert!(!panels.is_visible(Panel::Categories));
        assert!(!panels.is_visible(Panel::Range));

        panels.toggle(Panel::Range);
        assert!(panels.is_visible(Panel::Range));
        assert!(!panels.is_visible(Panel::Categories));

        panels.toggle(Panel::Range);
        assert!(!panels.is_visible(Panel::Range));
    }

    #[test]
    fn render_replaces_previous_entries() {
        let store = example_store();
        let mut s = surface();

        let all: Vec<&Entry> = store.iter().collect();
        s.render_entries(&all);
        assert_eq!(s.entry_count(), 2);
        assert!(s.entries_html().contains("Rust tips"));

        s.render_entries(&all[1..]);
        assert_eq!(s.entry_count(), 1);
        assert!(!s.entries_html().contains("Rust tips"));
        assert_eq!(s.render_passes(), 2);
    }

    #[test]
    fn empty_render_shows_placeholder() {
        let mut s = surface();
        s.render_entries(&[]);
        assert_eq!(s.entry_count(), 0);
        assert!(s.entries_html().contains("No data to show! :("));
    }

    #[test]
    fn records_controls_and_alerts() {
        let mut s = surface();
        s.set_sort_label("Sort (asc)");
        s.set_range_value(RangeField::Finish, "2022-04-01");
        s.alert("Invalid date range!");
        s.toggle_panel(Panel::Categories);

        assert_eq!(s.sort_label(), "Sort (asc)");
        assert_eq!(s.range_value(RangeField::Finish), "2022-04-01");
        assert_eq!(s.range_value(RangeField::Start), "");
        assert_eq!(s.alerts(), ["Invalid date range!".to_string()]);
        assert!(s.panels().categories);
    }
}
