//! # themekit
//!
//! Resolves, applies and persists the UI color theme of a browser page.
//!
//! A [`ThemePolicy`] owns a [`ThemeConfig`] and up to three injected
//! capabilities: a [`PresentationSurface`] (the document root element), a
//! [`PersistentStore`] (a single key-value slot) and a
//! [`SystemPreferenceSource`] (the platform light/dark preference). Each one
//! may be absent; the policy degrades to configured defaults instead of
//! failing.
//!
//! The `memory` backends work anywhere and back the test suite. The `web`
//! backends (feature `hydrate`) bind the same capabilities to `localStorage`,
//! `document.documentElement` and `matchMedia`.

pub mod capability;
pub mod config;
pub mod memory;
pub mod policy;
pub mod theme;
#[cfg(feature = "hydrate")]
pub mod web;

pub use capability::{
    ChangeHandler, PersistentStore, PresentationSurface, StoreError, SubscribeError, Subscription,
    SurfaceError, SystemPreferenceSource,
};
pub use config::{ConfigError, ThemeConfig};
pub use policy::ThemePolicy;
pub use theme::{ColorMode, Theme, ToggleCycle, ToggleMode};
