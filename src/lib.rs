//! # Blog Filter
//!
//! Renders a static list of blog posts into a page and lets a visitor narrow
//! it down by category and date range, newest or oldest first.
//!
//! # Architecture: One Pipeline, Re-run From Scratch
//!
//! Every interaction ends in the same pass over the whole entry store:
//!
//! ```text
//! data.json ─▶ EntryStore ─▶ sort ─▶ category filter ─▶ range filter ─▶ Surface
//!                                ▲            ▲                ▲
//!                                └──── FilterState (owned by Board) ────┘
//! ```
//!
//! Passes never build on a previous result, so the visible list is always a
//! pure function of the store and the current [`pipeline::FilterState`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`entry`] | Entry records and the immutable store loaded from JSON |
//! | [`date`] | Timestamp parsing and `YYYY-MM-DD` formatting |
//! | [`sort`] | Date ordering, ascending or descending |
//! | [`category`] | Category derivation, `other` grouping, checkbox ids, filtering |
//! | [`range`] | Inclusive date windows and range-input validation |
//! | [`render`] | Maud templates for entry cards, filter controls and the page |
//! | [`surface`] | The UI seam (`Surface` trait) and the HTML implementation |
//! | [`pipeline`] | `Board`: filter state, event handling, pipeline passes |
//! | [`config`] | `config.toml` loading, validation and color CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The UI Behind a Trait
//!
//! The board never reads from the UI. Checked categories, the sort order and
//! the last valid range live in [`pipeline::FilterState`]; event handlers
//! update that state and then push results out through [`surface::Surface`].
//! Tests drive the board with [`surface::HtmlSurface`] and inspect what it
//! recorded.
//!
//! ## Undated Entries
//!
//! An entry whose date is missing or unparseable is kept in the store,
//! reported once at load, sorted after every dated entry and dropped by the
//! range filter. Its card shows today's date if it is ever rendered outside
//! the pipeline.

pub mod category;
pub mod config;
pub mod date;
pub mod entry;
pub mod output;
pub mod pipeline;
pub mod range;
pub mod render;
pub mod sort;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_helpers;
