//! Theme resolution, application and persistence.
//!
//! RESOLUTION ORDER
//! ================
//! 1. The persisted slot, when it holds a non-empty value.
//! 2. The root element attribute, when set and non-empty.
//! 3. The platform preference, mapped to `dark` / `light`.
//!
//! Without a presentation surface every read returns the configured default
//! and every write is skipped.
//!
//! TRADE-OFFS
//! ==========
//! Storage faults are indistinguishable from an empty slot and are never
//! reported or logged. Theme selection runs during page boot, where a failure
//! must not take the page down with it.

use std::rc::Rc;

use crate::capability::{
    ChangeHandler, PersistentStore, PresentationSurface, StoreError, SubscribeError, Subscription,
    SystemPreferenceSource,
};
use crate::config::ThemeConfig;
use crate::theme::{ColorMode, Theme};

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;

/// Resolves and applies the page theme through injected capabilities.
pub struct ThemePolicy {
    config: ThemeConfig,
    surface: Option<Box<dyn PresentationSurface>>,
    store: Option<Box<dyn PersistentStore>>,
    preference: Option<Box<dyn SystemPreferenceSource>>,
}

impl ThemePolicy {
    /// A policy with no capabilities attached.
    #[must_use]
    pub fn new(config: ThemeConfig) -> Self {
        Self { config, surface: None, store: None, preference: None }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: impl PresentationSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: impl PersistentStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    #[must_use]
    pub fn with_preference(mut self, preference: impl SystemPreferenceSource + 'static) -> Self {
        self.preference = Some(Box::new(preference));
        self
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ThemeConfig {
        &mut self.config
    }

    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// The active theme: stored value, then root attribute, then platform
    /// preference.
    #[must_use]
    pub fn get_theme(&self) -> Theme {
        let Some(surface) = self.surface.as_deref() else {
            return self.config.default_theme.clone();
        };

        if let Some(stored) = self.stored_theme() {
            return stored;
        }

        if let Some(applied) = surface.attribute(&self.config.attribute_name).and_then(Theme::new) {
            return applied;
        }

        self.system_prefers()
    }

    /// Apply `theme` to the root element and persist it.
    ///
    /// Ignored without a surface or when `theme` is empty. The attribute is
    /// written first and stays written if persisting fails.
    pub fn set_theme(&self, theme: impl AsRef<str>) {
        let Some(surface) = self.surface.as_deref() else {
            return;
        };
        let Some(theme) = Theme::new(theme.as_ref()) else {
            return;
        };

        self.apply(surface, &theme);
        self.persist(&theme);
    }

    /// Advance to the next theme of the toggle cycle, apply and persist it.
    pub fn toggle_theme(&self) -> Theme {
        if self.surface.is_none() {
            return self.config.default_theme.clone();
        }

        let current = self.get_theme();
        let next = self
            .config
            .toggle_cycle
            .next_after(&current, self.config.toggle_mode)
            .clone();
        log::debug!("theme: toggle {current} -> {next}");

        self.set_theme(&next);
        next
    }

    /// The platform preference as `dark` / `light`, queried on every call.
    #[must_use]
    pub fn system_prefers(&self) -> Theme {
        if self.surface.is_none() {
            return self.config.default_theme.clone();
        }
        match self.preference.as_deref().and_then(|source| source.prefers_dark()) {
            Some(dark) => ColorMode::from_prefers_dark(dark).theme(),
            None => self.config.default_theme.clone(),
        }
    }

    /// Call `callback` with `dark` / `light` on every platform preference
    /// change.
    ///
    /// Tries the event-listener registration first and falls back to the
    /// legacy one. Returns `None` when nothing could be registered.
    pub fn watch_system_theme(&self, callback: impl Fn(Theme) + 'static) -> Option<Subscription> {
        if self.surface.is_none() {
            return None;
        }
        let preference = self.preference.as_deref()?;

        let handler: ChangeHandler = Rc::new(move |dark| callback(ColorMode::from_prefers_dark(dark).theme()));
        match subscribe(preference, handler) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                log::debug!("theme: system preference watch unavailable: {err}");
                None
            }
        }
    }

    /// Apply the stored theme, or the platform preference on first run.
    ///
    /// A preference-derived choice is persisted so later visits keep it; an
    /// existing stored choice is re-applied and never rewritten.
    pub fn init_theme(&self) {
        let Some(surface) = self.surface.as_deref() else {
            return;
        };

        match self.stored_theme() {
            Some(stored) => {
                log::debug!("theme: init from storage: {stored}");
                self.apply(surface, &stored);
            }
            None => {
                let chosen = self.system_prefers();
                log::debug!("theme: init from system preference: {chosen}");
                self.apply(surface, &chosen);
                self.persist(&chosen);
            }
        }
    }

    fn stored_theme(&self) -> Option<Theme> {
        let store = self.store.as_deref()?;
        match store.get(&self.config.storage_key) {
            Ok(value) => value.and_then(Theme::new),
            Err(_) => None,
        }
    }

    fn persist(&self, theme: &Theme) {
        let Some(store) = self.store.as_deref() else {
            return;
        };
        // A rejected write leaves the page exactly as a missing store would.
        match store.set(&self.config.storage_key, theme.as_str()) {
            Ok(()) | Err(StoreError::Unavailable | StoreError::Access(_)) => {}
        }
    }

    fn apply(&self, surface: &dyn PresentationSurface, theme: &Theme) {
        if let Err(err) = surface.set_attribute(&self.config.attribute_name, theme.as_str()) {
            log::warn!("theme: {err}");
        }
    }
}

fn subscribe(preference: &dyn SystemPreferenceSource, handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
    match preference.listen(Rc::clone(&handler)) {
        Ok(subscription) => Ok(subscription),
        Err(err) => {
            log::debug!("theme: {err}, falling back to legacy listener");
            preference.listen_legacy(handler)
        }
    }
}
