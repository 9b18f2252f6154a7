//! Theme identifiers and the toggle cycle.
//!
//! DESIGN
//! ======
//! A theme is an opaque non-empty string. Only `light` and `dark` carry
//! meaning here, because they are what the platform preference maps to;
//! everything else is caller-defined and compared by identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

const LIGHT: &str = "light";
const DARK: &str = "dark";

/// A non-empty theme identifier such as `"light"`, `"dark"` or `"sepia"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Theme(String);

impl Theme {
    /// Build a theme, returning `None` for the empty string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    #[must_use]
    pub fn light() -> Self {
        Self(LIGHT.to_owned())
    }

    #[must_use]
    pub fn dark() -> Self {
        Self(DARK.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Theme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Theme {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfigError::EmptyTheme)
    }
}

impl TryFrom<&str> for Theme {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl From<Theme> for String {
    fn from(value: Theme) -> Self {
        value.0
    }
}

impl PartialEq<str> for Theme {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Theme {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The platform's reported color preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Map a `prefers-color-scheme: dark` match result.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// The built-in theme this mode selects.
    #[must_use]
    pub fn theme(self) -> Theme {
        match self {
            Self::Light => Theme::light(),
            Self::Dark => Theme::dark(),
        }
    }
}

/// How [`ToggleCycle::next_after`] picks the following theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleMode {
    /// Advance to the next entry, wrapping around. Unknown themes restart at
    /// the first entry.
    #[default]
    Cycle,
    /// Flip between the first two entries. The second entry goes back to the
    /// first; anything else goes to the second.
    Binary,
}

/// Ordered, non-empty list of themes the toggle walks through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Theme>", into = "Vec<Theme>")]
pub struct ToggleCycle(Vec<Theme>);

impl ToggleCycle {
    /// Build a cycle. Fails when `themes` is empty.
    pub fn new(themes: Vec<Theme>) -> Result<Self, ConfigError> {
        if themes.is_empty() {
            return Err(ConfigError::EmptyToggleCycle);
        }
        Ok(Self(themes))
    }

    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> &Theme {
        &self.0[0]
    }

    /// Position of `theme` in the cycle.
    #[must_use]
    pub fn position(&self, theme: &Theme) -> Option<usize> {
        self.0.iter().position(|t| t == theme)
    }

    /// The theme that follows `current` under `mode`.
    #[must_use]
    pub fn next_after(&self, current: &Theme, mode: ToggleMode) -> &Theme {
        match mode {
            ToggleMode::Cycle => {
                let next = self.position(current).map_or(0, |i| (i + 1) % self.0.len());
                &self.0[next]
            }
            ToggleMode::Binary => {
                let first = self.first();
                let second = self.0.get(1).unwrap_or(first);
                if current == second { first } else { second }
            }
        }
    }
}

impl Default for ToggleCycle {
    fn default() -> Self {
        Self(vec![Theme::light(), Theme::dark()])
    }
}

impl TryFrom<Vec<Theme>> for ToggleCycle {
    type Error = ConfigError;

    fn try_from(value: Vec<Theme>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToggleCycle> for Vec<Theme> {
    fn from(value: ToggleCycle) -> Self {
        value.0
    }
}
