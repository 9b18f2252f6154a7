//! Theme policy configuration.
//!
//! A [`ThemeConfig`] is owned by one [`crate::ThemePolicy`] and may be edited
//! in place at any time; operations read it when they run.

use serde::{Deserialize, Serialize};

use crate::theme::{Theme, ToggleCycle, ToggleMode};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_STORAGE_KEY: &str = "mdkva-theme";
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-theme";

/// Error returned when building themes or configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A theme identifier was the empty string.
    #[error("theme must be a non-empty string")]
    EmptyTheme,
    /// The toggle cycle had no entries.
    #[error("toggle cycle must contain at least one theme")]
    EmptyToggleCycle,
    /// The JSON config document could not be parsed.
    #[error("invalid theme config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Key of the persisted slot.
    pub storage_key: String,
    /// Returned whenever no presentation surface is available.
    pub default_theme: Theme,
    pub toggle_cycle: ToggleCycle,
    /// Root element attribute that carries the theme.
    pub attribute_name: String,
    pub toggle_mode: ToggleMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_theme: Theme::light(),
            toggle_cycle: ToggleCycle::default(),
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_owned(),
            toggle_mode: ToggleMode::Cycle,
        }
    }
}

impl ThemeConfig {
    /// Parse a config object, filling missing fields with defaults.
    ///
    /// ```json
    /// { "storage_key": "site-theme", "toggle_cycle": ["light", "dark", "sepia"] }
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    #[must_use]
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    #[must_use]
    pub fn with_toggle_cycle(mut self, cycle: ToggleCycle) -> Self {
        self.toggle_cycle = cycle;
        self
    }

    #[must_use]
    pub fn with_toggle_mode(mut self, mode: ToggleMode) -> Self {
        self.toggle_mode = mode;
        self
    }
}
