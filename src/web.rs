//! Browser capability backends.
//!
//! Binds the theme policy to `localStorage`, `document.documentElement` and
//! `matchMedia("(prefers-color-scheme: dark)")`. Requires a browser
//! environment; every constructor returns `None` outside one.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::capability::{
    ChangeHandler, PersistentStore, PresentationSurface, StoreError, SubscribeError, Subscription, SurfaceError,
    SystemPreferenceSource,
};
use crate::config::ThemeConfig;
use crate::policy::ThemePolicy;

pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

const CHANGE_EVENT: &str = "change";

impl ThemePolicy {
    /// Detect the browser capabilities once and attach the ones present.
    ///
    /// Outside a document (workers, server rendering) the policy has no
    /// surface and every operation falls back to the configured default.
    #[must_use]
    pub fn browser(config: ThemeConfig) -> Self {
        let mut policy = Self::new(config);
        if let Some(root) = DocumentRoot::detect() {
            policy = policy.with_surface(root).with_store(LocalStorage);
        }
        if let Some(preference) = MediaQueryPreference::detect() {
            policy = policy.with_preference(preference);
        }
        policy
    }
}

/// `window.localStorage`, looked up on every access.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl PersistentStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?.get_item(key).map_err(store_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?.set_item(key, value).map_err(store_error)
    }
}

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or(StoreError::Unavailable)?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StoreError::Unavailable),
        Err(err) => Err(store_error(err)),
    }
}

fn store_error(err: JsValue) -> StoreError {
    StoreError::Access(describe(&err))
}

/// The `<html>` element.
#[derive(Clone, Debug)]
pub struct DocumentRoot {
    element: web_sys::Element,
}

impl DocumentRoot {
    #[must_use]
    pub fn detect() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self { element })
    }
}

impl PresentationSurface for DocumentRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.element
            .set_attribute(name, value)
            .map_err(|err| SurfaceError { name: name.to_owned(), reason: describe(&err) })
    }
}

/// The `prefers-color-scheme: dark` media query list.
#[derive(Clone, Debug)]
pub struct MediaQueryPreference {
    query: web_sys::MediaQueryList,
}

impl MediaQueryPreference {
    #[must_use]
    pub fn detect() -> Option<Self> {
        match web_sys::window()?.match_media(PREFERS_DARK_QUERY) {
            Ok(Some(query)) => Some(Self { query }),
            Ok(None) | Err(_) => None,
        }
    }
}

impl SystemPreferenceSource for MediaQueryPreference {
    fn prefers_dark(&self) -> Option<bool> {
        Some(self.query.matches())
    }

    // Older Safari `MediaQueryList` is not an `EventTarget`; the call throws
    // and the policy retries with `listen_legacy`.
    fn listen(&self, handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
        let callback = change_callback(handler);
        self.query
            .add_event_listener_with_callback(CHANGE_EVENT, &callback)
            .map_err(|err| SubscribeError::Failed(describe(&err)))?;

        let query = self.query.clone();
        Ok(Subscription::new(move || {
            if let Err(err) = query.remove_event_listener_with_callback(CHANGE_EVENT, &callback) {
                log::debug!("theme: removing change listener failed: {}", describe(&err));
            }
        }))
    }

    fn listen_legacy(&self, handler: ChangeHandler) -> Result<Subscription, SubscribeError> {
        let callback = change_callback(handler);
        self.query
            .add_listener_with_opt_callback(Some(&callback))
            .map_err(|err| SubscribeError::Failed(describe(&err)))?;

        let query = self.query.clone();
        Ok(Subscription::new(move || {
            if let Err(err) = query.remove_listener_with_opt_callback(Some(&callback)) {
                log::debug!("theme: removing legacy listener failed: {}", describe(&err));
            }
        }))
    }
}

/// Wrap `handler` in a JS function reading `matches` from its argument.
///
/// Both registration styles pass an object with a boolean `matches` field
/// (`MediaQueryListEvent` or the `MediaQueryList` itself). The closure is
/// handed to the JS garbage collector so a dropped [`Subscription`] keeps
/// the listener alive.
fn change_callback(handler: ChangeHandler) -> js_sys::Function {
    let closure = Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| {
        let matches = js_sys::Reflect::get(&event, &JsValue::from_str("matches"))
            .map_or(false, |value| value.as_bool().unwrap_or(false));
        handler(matches);
    });
    closure.into_js_value().unchecked_into()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
