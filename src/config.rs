//! Board configuration.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` overrides just the keys it sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [range]
//! earliest = "2022-03-15"   # Default start of the date window, and input min
//!
//! [labels]
//! page_title = "Blog"
//! default_title = "Blog post"       # Shown for entries without a title
//! default_content = "..."           # Shown for entries without content
//! no_data = "No data to show! :("   # Placeholder when nothing matches
//! invalid_range = "Invalid date range!"
//!
//! [colors.light]
//! background = "#f4f4f4"
//! surface = "#ffffff"
//! text = "#222222"
//! text_muted = "#777777"
//! border = "#dddddd"
//! accent = "#3a6ea5"
//!
//! [colors.dark]
//! background = "#121212"
//! surface = "#1e1e1e"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#7aa7d8"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::date;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use time::Date;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Board configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Date window defaults.
    pub range: RangeConfig,
    /// Display texts and fallbacks.
    pub labels: LabelsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl BoardConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.earliest_date()?;
        let labels = [
            ("labels.page_title", &self.labels.page_title),
            ("labels.default_title", &self.labels.default_title),
            ("labels.default_content", &self.labels.default_content),
            ("labels.no_data", &self.labels.no_data),
            ("labels.invalid_range", &self.labels.invalid_range),
        ];
        for (key, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// `range.earliest` as a calendar date.
    pub fn earliest_date(&self) -> Result<Date, ConfigError> {
        date::parse_date(&self.range.earliest).ok_or_else(|| {
            ConfigError::Validation(format!(
                "range.earliest must be a YYYY-MM-DD date, got {:?}",
                self.range.earliest
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    /// First day of the default window and `min` of both range inputs.
    pub earliest: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            earliest: "2022-03-15".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Document `<title>` and page heading.
    pub page_title: String,
    /// Shown in place of a missing title.
    pub default_title: String,
    /// Shown in place of missing content.
    pub default_content: String,
    /// Placeholder when no entry survives the filters.
    pub no_data: String,
    /// Alert raised when the range inputs are inverted.
    pub invalid_range: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            page_title: "Blog".to_string(),
            default_title: "Blog post".to_string(),
            default_content: "...".to_string(),
            no_data: "No data to show! :(".to_string(),
            invalid_range: "Invalid date range!".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Background of entry cards and filter panels.
    pub surface: String,
    pub text: String,
    /// Dates and secondary text.
    pub text_muted: String,
    pub border: String,
    /// Buttons and checked controls.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f4f4f4".to_string(),
            surface: "#ffffff".to_string(),
            text: "#222222".to_string(),
            text_muted: "#777777".to_string(),
            border: "#dddddd".to_string(),
            accent: "#3a6ea5".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            surface: "#1e1e1e".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#7aa7d8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BoardConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BoardConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BoardConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<BoardConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_none() {
        tracing::debug!(dir = %dir.display(), "no config.toml, using stock defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blog-filter configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Date range
# ---------------------------------------------------------------------------
[range]
# First day of the default window. Also the `min` of both date inputs.
# The window ends today.
earliest = "2022-03-15"

# ---------------------------------------------------------------------------
# Labels
# ---------------------------------------------------------------------------
[labels]
page_title = "Blog"

# Shown for entries without a title / without content.
default_title = "Blog post"
default_content = "..."

# Placeholder when no entry passes the filters.
no_data = "No data to show! :("

# Alert text when the range start is after the finish.
invalid_range = "Invalid date range!"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f4f4f4"
surface = "#ffffff"       # Entry cards and filter panels
text = "#222222"
text_muted = "#777777"    # Dates
border = "#dddddd"
accent = "#3a6ea5"        # Buttons

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
surface = "#1e1e1e"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#7aa7d8"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}
