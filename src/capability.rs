//! Host capabilities the theme policy reads and writes but does not own.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each capability is injected independently and may be missing entirely,
//! e.g. during server rendering or in a worker. Implementations report faults
//! through `Result`; the policy decides which faults matter.

use std::fmt;
use std::rc::Rc;

#[cfg(test)]
#[path = "capability_test.rs"]
mod tests;

/// Callback receiving the new "prefers dark" state on every platform change.
pub type ChangeHandler = Rc<dyn Fn(bool)>;

/// Error returned by [`PersistentStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No backing storage exists (disabled, sandboxed, private mode).
    #[error("persistent storage is unavailable")]
    Unavailable,
    /// The backing storage rejected the operation.
    #[error("persistent storage access failed: {0}")]
    Access(String),
}

/// Error returned by [`PresentationSurface::set_attribute`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to set attribute `{name}`: {reason}")]
pub struct SurfaceError {
    pub name: String,
    pub reason: String,
}

/// Error returned when registering a change listener.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscribeError {
    /// The platform does not offer this registration style.
    #[error("{0} change subscription is not supported")]
    Unsupported(&'static str),
    /// Registration was attempted and rejected.
    #[error("change subscription failed: {0}")]
    Failed(String),
}

/// A single string key-value slot that survives page reloads.
pub trait PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The document root element that displays the theme attribute.
pub trait PresentationSurface {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), SurfaceError>;
}

/// The platform's light/dark preference and its change notifications.
pub trait SystemPreferenceSource {
    /// Current reading, or `None` when the platform cannot answer.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register `handler` using the event-listener style.
    fn listen(&self, handler: ChangeHandler) -> Result<Subscription, SubscribeError>;

    /// Register `handler` using the older listener style. Sources without
    /// one keep the default.
    fn listen_legacy(&self, _handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
        Err(SubscribeError::Unsupported("legacy"))
    }
}

/// Handle to a registered change listener.
///
/// Dropping the handle leaves the listener registered for the lifetime of
/// the page; call [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Remove the listener. Later platform changes no longer reach it.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
