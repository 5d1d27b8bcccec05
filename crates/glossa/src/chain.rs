//! Backend composition: try multiple translation sources in priority
//! order.

use crate::engine::{Engine, Options};
use crate::error::TranslateError;
use crate::types::{Entry, Key};

/// A translation source usable in a [`Chain`].
pub trait Backend: Send + Sync {
    /// Resolve a key for a locale.
    fn translate(
        &self,
        locale: &str,
        key: &Key,
        options: &Options,
    ) -> Result<Entry, TranslateError>;

    /// Locale codes this backend can serve.
    fn available_locales(&self) -> Vec<String>;

    /// Interface-compatibility hook for hot-reloadable backends. Must not
    /// fail and must not clear cache or store state.
    fn reload(&self) {}
}

impl Backend for Engine {
    fn translate(
        &self,
        locale: &str,
        key: &Key,
        options: &Options,
    ) -> Result<Entry, TranslateError> {
        Engine::translate(self, locale, key.clone(), options.clone())
    }

    fn available_locales(&self) -> Vec<String> {
        Engine::available_locales(self)
    }
}

/// An ordered list of backends tried until one yields a non-missing result.
///
/// Only the missing-translation signal advances the chain; hard failures
/// (invalid locale, malformed defaults, store breakage) propagate from the
/// backend that raised them.
pub struct Chain {
    backends: Vec<Box<dyn Backend>>,
}

impl Chain {
    /// Build a chain from backends in priority order.
    pub fn new(backends: Vec<Box<dyn Backend>>) -> Self {
        Self { backends }
    }

    /// Try each backend in order; the first non-missing result wins. When
    /// every backend misses, the first backend's missing signal is
    /// returned.
    pub fn translate(
        &self,
        locale: &str,
        key: &Key,
        options: &Options,
    ) -> Result<Entry, TranslateError> {
        let mut missing = None;
        for backend in &self.backends {
            match backend.translate(locale, key, options) {
                Err(error) if error.is_missing() => {
                    missing.get_or_insert(error);
                }
                other => return other,
            }
        }
        Err(missing.unwrap_or_else(|| TranslateError::MissingTranslation {
            locale: locale.to_string(),
            key: key.as_str().to_string(),
        }))
    }

    /// The de-duplicated union of every backend's locale list, in backend
    /// order.
    pub fn available_locales(&self) -> Vec<String> {
        let mut union = Vec::new();
        for backend in &self.backends {
            for code in backend.available_locales() {
                if !union.contains(&code) {
                    union.push(code);
                }
            }
        }
        union
    }

    /// Forward the no-op reload to every backend.
    pub fn reload(&self) {
        for backend in &self.backends {
            backend.reload();
        }
    }
}
