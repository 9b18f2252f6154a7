//! In-memory capability backends.
//!
//! Used for non-browser hosts and by the test suite. Every type is a cheap
//! handle over shared state: clone one, hand the clone to a
//! [`crate::ThemePolicy`], and keep the first handle to inspect or drive it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::capability::{
    ChangeHandler, PersistentStore, PresentationSurface, StoreError, SubscribeError, Subscription,
    SurfaceError, SystemPreferenceSource,
};

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

#[derive(Debug, Default)]
struct StoreState {
    values: HashMap<String, String>,
    writes: usize,
    failing: bool,
}

/// Key-value store with a write counter and switchable fault injection.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails.
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Seed a value without counting it as a write.
    pub fn insert(&self, key: &str, value: &str) {
        self.state.borrow_mut().values.insert(key.to_owned(), value.to_owned());
    }

    /// Read a value, bypassing fault injection.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.state.borrow().values.get(key).cloned()
    }

    /// Number of successful writes through [`PersistentStore::set`].
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    /// Drop every stored value.
    pub fn clear(&self) {
        self.state.borrow_mut().values.clear();
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.state.borrow();
        if state.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(StoreError::Access(format!("write to `{key}` rejected")));
        }
        state.values.insert(key.to_owned(), value.to_owned());
        state.writes += 1;
        Ok(())
    }
}

/// Root element stand-in holding attributes in a map.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    attributes: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSurface for MemorySurface {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), SurfaceError> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(SurfaceError { name: name.to_owned(), reason: "invalid attribute name".to_owned() });
        }
        self.attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

struct PreferenceState {
    prefers_dark: Option<bool>,
    modern: bool,
    legacy: bool,
    next_id: u64,
    listeners: Vec<(u64, ChangeHandler)>,
}

/// Preference source driven by the host: set the preference and every
/// registered listener is notified.
#[derive(Clone)]
pub struct ManualPreference {
    state: Rc<RefCell<PreferenceState>>,
}

impl ManualPreference {
    /// A source reporting `prefers_dark`, supporting both registration styles.
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(PreferenceState {
                prefers_dark: Some(prefers_dark),
                modern: true,
                legacy: true,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// A source that cannot report a reading.
    #[must_use]
    pub fn unknown() -> Self {
        let source = Self::new(false);
        source.state.borrow_mut().prefers_dark = None;
        source
    }

    /// Restrict which registration styles succeed.
    #[must_use]
    pub fn with_support(self, modern: bool, legacy: bool) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.modern = modern;
            state.legacy = legacy;
        }
        self
    }

    /// Change the preference and notify listeners when it differs.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let listeners: Vec<ChangeHandler> = {
            let mut state = self.state.borrow_mut();
            if state.prefers_dark == Some(prefers_dark) {
                return;
            }
            state.prefers_dark = Some(prefers_dark);
            state.listeners.iter().map(|(_, handler)| Rc::clone(handler)).collect()
        };
        // Handlers may call back into this source.
        for handler in listeners {
            handler(prefers_dark);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn register(&self, handler: ChangeHandler) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, handler));
            id
        };
        let state = Rc::clone(&self.state);
        Subscription::new(move || state.borrow_mut().listeners.retain(|(other, _)| *other != id))
    }
}

impl SystemPreferenceSource for ManualPreference {
    fn prefers_dark(&self) -> Option<bool> {
        self.state.borrow().prefers_dark
    }

    fn listen(&self, handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
        if !self.state.borrow().modern {
            return Err(SubscribeError::Unsupported("event listener"));
        }
        Ok(self.register(handler))
    }

    fn listen_legacy(&self, handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
        if !self.state.borrow().legacy {
            return Err(SubscribeError::Unsupported("legacy"));
        }
        Ok(self.register(handler))
    }
}
