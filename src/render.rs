//! HTML rendering.
//!
//! Turns pipeline output into markup. Every call renders from scratch; there
//! is no reuse or diffing of earlier output.
//!
//! The written page is a snapshot of one board state. It carries no script,
//! so its checkboxes, range inputs and buttons show that state but do not
//! change it. Interaction is replayed through the `session` command, which
//! writes a new snapshot after the last event.
//!
//! ## Page Structure
//!
//! ```text
//! header.page-header
//! ├── h1                                   page title
//! └── nav.filters
//!     ├── button#filter-category-btn
//!     ├── div#filter-category-list         (.hidden when collapsed)
//!     │   └── form#filter-category-form    one checkbox + label per category
//!     ├── button#filter-range-btn
//!     ├── div#filter-range-list            (.hidden when collapsed)
//!     │   └── form#filter-range-form       #filter-range-start, #filter-range-finish
//!     └── button#filter-sort-btn           "Sort (desc)"
//! main#blog-entries                        entry cards or the no-data box
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! so all dataset text is escaped automatically.

use crate::category::{CategoryControl, CategoryId};
use crate::config::{self, BoardConfig, LabelsConfig};
use crate::entry::Entry;
use crate::range::{RangeField, RangeInputs};
use crate::surface::PanelVisibility;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

// ============================================================================
// Entry list
// ============================================================================

/// Renders one entry card, substituting display defaults for missing fields.
///
/// `today` stands in for a missing date.
pub fn render_entry(entry: &Entry, labels: &LabelsConfig, today: &str) -> Markup {
    let title = non_empty(entry.title.as_deref()).unwrap_or(&labels.default_title);
    let date = non_empty(entry.date.as_deref()).unwrap_or(today);
    let content = non_empty(entry.content.as_deref()).unwrap_or(&labels.default_content);
    let category = CategoryId::of(entry);

    html! {
        div.blog-entry.box data-category=(category.as_str()) {
            div.blog-entry-title { (title) }
            div.blog-entry-date { (date) }
            div.blog-entry-content { (content) }
        }
    }
}

/// Renders the contents of `#blog-entries`, in the order given.
///
/// An empty list renders the single no-data placeholder.
pub fn render_entries(entries: &[&Entry], labels: &LabelsConfig, today: &str) -> Markup {
    html! {
        @if entries.is_empty() {
            div.box.no-data { (labels.no_data) }
        } @else {
            @for entry in entries {
                (render_entry(entry, labels, today))
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Filter controls
// ============================================================================

/// Renders the checkbox + label pairs of `#filter-category-form`.
pub fn render_category_form(controls: &[CategoryControl]) -> Markup {
    html! {
        form id="filter-category-form" {
            @for control in controls {
                input
                    type="checkbox"
                    id=(control.id)
                    value=(control.value.as_str())
                    checked[control.checked];
                label for=(control.id) { (control.value.as_str()) }
            }
        }
    }
}

/// Renders `#filter-range-form` with both date inputs.
pub fn render_range_form(inputs: &RangeInputs) -> Markup {
    let limits = inputs.limits();
    html! {
        form id="filter-range-form" {
            @for (field, text) in [(RangeField::Start, "From"), (RangeField::Finish, "To")] {
                label for=(field.input_id()) { (text) }
                input type="date"
                    id=(field.input_id())
                    value=(inputs.committed().value(field))
                    min=(limits.start())
                    max=(limits.finish());
            }
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// Everything the page shows besides the entry list.
pub struct PageView<'a> {
    pub config: &'a BoardConfig,
    pub categories: &'a [CategoryControl],
    pub range: &'a RangeInputs,
    pub sort_label: &'a str,
    pub panels: PanelVisibility,
}

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the full page around an already rendered entry list.
pub fn render_page(view: &PageView<'_>, entries: Markup) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&view.config.colors),
        CSS_STATIC
    );
    let labels = &view.config.labels;

    let content = html! {
        header.page-header {
            h1 { (labels.page_title) }
            nav.filters {
                div.filter {
                    button id="filter-category-btn" type="button" { "Categories" }
                    div id="filter-category-list" class=(panel_class(view.panels.categories)) {
                        (render_category_form(view.categories))
                    }
                }
                div.filter {
                    button id="filter-range-btn" type="button" { "Date range" }
                    div id="filter-range-list" class=(panel_class(view.panels.range)) {
                        (render_range_form(view.range))
                    }
                }
                div.filter {
                    button id="filter-sort-btn" type="button" { (view.sort_label) }
                }
            }
        }
        main id="blog-entries" class="blog-entries" {
            (entries)
        }
    };

    base_document(&labels.page_title, &css, content)
}

fn panel_class(visible: bool) -> &'static str {
    if visible {
        "filter-list box"
    } else {
        "filter-list box hidden"
    }
}

/// Write `index.html` into `output_dir`, creating it if needed.
pub fn write_page(output_dir: &Path, page: Markup) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("index.html");
    fs::write(&path, page.into_string())?;
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
