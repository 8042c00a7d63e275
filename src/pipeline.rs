//! The filter pipeline and the board that drives it.
//!
//! A pass always starts from the whole store:
//!
//! ```text
//! store ─▶ sort(order) ─▶ category filter(selected)
//!       ─▶ range filter(window) ─▶ surface
//! ```
//!
//! Nothing is cached between passes. [`Board`] owns the store and the
//! [`FilterState`], and every [`Event`] handler runs to completion before the
//! next one, so the state is only ever touched through `&mut Board`.
//!
//! ## Events
//!
//! | Event | State change | Pass? |
//! |-------|--------------|-------|
//! | `CategoryChanged` | add/remove from the selected set | yes |
//! | `RangeChanged` (valid) | commit both bounds | yes |
//! | `RangeChanged` (invalid) | none; input reverted, alert raised | no |
//! | `SortToggled` | flip order, relabel the sort button | yes |
//! | `PanelToggled` | none | no |

use crate::category::{self, CategoryControl, CategoryId};
use crate::config::{BoardConfig, ConfigError};
use crate::date;
use crate::entry::{Entry, EntryStore};
use crate::range::{DateRange, RangeError, RangeField, RangeInputs};
use crate::render::{self, PageView};
use crate::sort::{self, SortOrder};
use crate::surface::{HtmlSurface, Panel, Surface};
use maud::{Markup, PreEscaped};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// The user-controlled filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub sorting_order: SortOrder,
    pub selected_categories: BTreeSet<CategoryId>,
    pub range: RangeInputs,
}

impl FilterState {
    /// Default state: newest first, every category checked, the full window.
    pub fn new(categories: &[CategoryId], window: DateRange) -> Self {
        Self {
            sorting_order: SortOrder::default(),
            selected_categories: categories.iter().cloned().collect(),
            range: RangeInputs::new(window),
        }
    }
}

/// One full pass over the store.
pub fn run_pipeline<'a>(store: &'a EntryStore, state: &FilterState) -> Vec<&'a Entry> {
    let sorted = sort::sort(store, state.sorting_order);
    let by_category = category::filter_categories(sorted, &state.selected_categories);
    state.range.committed().filter(by_category)
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CategoryChanged { category: CategoryId, checked: bool },
    RangeChanged { field: RangeField, value: String },
    SortToggled,
    PanelToggled(Panel),
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A pass ran and showed this many entries.
    Rendered(usize),
    /// The range change was refused; nothing was re-rendered.
    Rejected(RangeError),
    PanelToggled(Panel),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown panel {0:?} (expected categories or range)")]
    UnknownPanel(String),
}

/// Parses one session line, e.g. `uncheck tech`, `finish 2022-04-01`, `sort`.
impl FromStr for Event {
    type Err = EventParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(EventParseError::MissingArgument(name))
            } else {
                Ok(arg)
            }
        };
        match command {
            "check" => Ok(Event::CategoryChanged {
                category: CategoryId::new(required("check")?),
                checked: true,
            }),
            "uncheck" => Ok(Event::CategoryChanged {
                category: CategoryId::new(required("uncheck")?),
                checked: false,
            }),
            "start" => Ok(Event::RangeChanged {
                field: RangeField::Start,
                value: required("start")?.to_string(),
            }),
            "finish" => Ok(Event::RangeChanged {
                field: RangeField::Finish,
                value: required("finish")?.to_string(),
            }),
            "sort" => Ok(Event::SortToggled),
            "toggle" => match required("toggle")? {
                "categories" => Ok(Event::PanelToggled(Panel::Categories)),
                "range" => Ok(Event::PanelToggled(Panel::Range)),
                other => Err(EventParseError::UnknownPanel(other.to_string())),
            },
            other => Err(EventParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// The orchestrator: entry store, derived categories and filter state.
#[derive(Debug, Clone)]
pub struct Board {
    store: EntryStore,
    categories: Vec<CategoryId>,
    state: FilterState,
    config: BoardConfig,
}

impl Board {
    /// Board with the default window: `range.earliest` through today.
    pub fn new(store: EntryStore, config: BoardConfig) -> Result<Self, ConfigError> {
        let earliest = config.earliest_date()?;
        let today = date::today();
        if earliest > today {
            tracing::warn!(
                %earliest,
                %today,
                "range.earliest is in the future, window is that day only"
            );
        }
        let window = DateRange::from_dates(earliest, today.max(earliest))
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(Self::with_window(store, config, window))
    }

    /// Board with an explicit default window.
    pub fn with_window(store: EntryStore, config: BoardConfig, window: DateRange) -> Self {
        for collision in category::id_collisions(&store) {
            tracing::warn!(
                id = %collision.id.checkbox_id(),
                raw = ?collision.raw,
                "categories share one checkbox and will filter together"
            );
        }
        let categories = category::distinct_categories(&store);
        let state = FilterState::new(&categories, window);
        Self {
            store,
            categories,
            state,
            config,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.state.sorting_order = order;
    }

    pub fn set_window(&mut self, window: DateRange) {
        self.state.range.commit(window);
    }

    /// Check or uncheck a category. Returns `false` for a category no entry has.
    pub fn set_checked(&mut self, category: &CategoryId, checked: bool) -> bool {
        if !self.categories.contains(category) {
            tracing::warn!(%category, "no entries have this category");
            return false;
        }
        if checked {
            self.state.selected_categories.insert(category.clone());
        } else {
            self.state.selected_categories.remove(category);
        }
        true
    }

    /// Entries the current state shows, in display order.
    pub fn visible(&self) -> Vec<&Entry> {
        run_pipeline(&self.store, &self.state)
    }

    pub fn category_controls(&self) -> Vec<CategoryControl> {
        category::controls(&self.categories, &self.state.selected_categories)
    }

    /// Sync every control on `surface` with the state, then run a pass.
    pub fn init(&self, surface: &mut dyn Surface) -> usize {
        surface.set_sort_label(&self.state.sorting_order.button_label());
        for field in [RangeField::Start, RangeField::Finish] {
            surface.set_range_value(field, self.state.range.committed().value(field));
        }
        self.filter_and_show_results(surface)
    }

    /// Run a pass and hand the result to `surface`. Returns the entry count.
    pub fn filter_and_show_results(&self, surface: &mut dyn Surface) -> usize {
        let visible = self.visible();
        tracing::debug!(
            order = %self.state.sorting_order,
            range = %self.state.range.committed(),
            categories = self.state.selected_categories.len(),
            visible = visible.len(),
            "pipeline pass"
        );
        surface.render_entries(&visible);
        visible.len()
    }

    pub fn handle(&mut self, event: Event, surface: &mut dyn Surface) -> Outcome {
        match event {
            Event::CategoryChanged { category, checked } => {
                self.set_checked(&category, checked);
                Outcome::Rendered(self.filter_and_show_results(surface))
            }
            Event::RangeChanged { field, value } => {
                match self.state.range.propose(field, &value) {
                    Ok(_) => Outcome::Rendered(self.filter_and_show_results(surface)),
                    Err(err) => {
                        let last_valid = self.state.range.committed().value(field);
                        surface.set_range_value(field, last_valid);
                        surface.alert(&self.config.labels.invalid_range);
                        Outcome::Rejected(err)
                    }
                }
            }
            Event::SortToggled => {
                self.state.sorting_order = self.state.sorting_order.toggle();
                surface.set_sort_label(&self.state.sorting_order.button_label());
                Outcome::Rendered(self.filter_and_show_results(surface))
            }
            Event::PanelToggled(panel) => {
                surface.toggle_panel(panel);
                Outcome::PanelToggled(panel)
            }
        }
    }

    /// The whole page: controls from the board state, entries and panels from `surface`.
    pub fn render_page(&self, surface: &HtmlSurface) -> Markup {
        let controls = self.category_controls();
        let view = PageView {
            config: &self.config,
            categories: &controls,
            range: &self.state.range,
            sort_label: surface.sort_label(),
            panels: surface.panels(),
        };
        render::render_page(&view, PreEscaped(surface.entries_html().to_string()))
    }
}
