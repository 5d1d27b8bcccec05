//! Database-backed translation resolution.
//!
//! Resolves a localization key plus a target locale into a display string,
//! using a persistent translation store, locale-fallback chains, two-form
//! pluralization, and a write-through cache. Multiple backends compose into
//! a [`Chain`] tried in priority order, typically a [`StaticBackend`] of
//! fixed resources ahead of the store-backed [`Engine`].

pub mod cache;
pub mod chain;
pub mod codec;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod format;
pub mod locales;
pub mod number;
pub mod static_backend;
pub mod store;
pub mod types;

pub use cache::{Cache, MemoryCache};
pub use chain::{Backend, Chain};
pub use engine::{DefaultArg, DefaultValue, Engine, Options};
pub use error::{TranslateError, compute_suggestions};
pub use fallback::FallbackConfig;
pub use format::{DefaultFormatter, Formatter};
pub use locales::{LocaleProvider, MemoryLocales};
pub use static_backend::StaticBackend;
pub use store::{MemoryStore, Store, StoreError};
pub use types::{
    Entry, Key, KeyHash, Locale, PLURAL_INDEX, SINGULAR_INDEX, TranslationRecord, Value,
};

/// Creates a `HashMap<String, Value>` of interpolation bindings.
///
/// Values are converted via `Into<Value>`, so integers, floats, and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use glossa::{Value, bindings};
///
/// let b = bindings! { "count" => 3, "name" => "Alice" };
/// assert_eq!(b.len(), 2);
/// assert_eq!(b["count"].as_number(), Some(3));
/// assert_eq!(b["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! bindings {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
