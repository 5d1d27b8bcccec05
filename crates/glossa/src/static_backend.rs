//! A static in-memory resource backend, tried ahead of the engine in a
//! chain.

use std::collections::HashMap;

use crate::chain::Backend;
use crate::codec;
use crate::engine::Options;
use crate::error::TranslateError;
use crate::format::{DefaultFormatter, Formatter};
use crate::types::{Entry, Key, Value};

/// A backend serving fixed, nested locale trees (typically deserialized
/// from JSON resource files).
///
/// Lookup walks the normalized key path through the tree. A mapping with
/// `one`/`other` keys pluralizes against `count`; text results are
/// interpolated with the default formatter.
///
/// # Example
///
/// ```
/// use glossa::{Backend, Entry, Key, Options, StaticBackend};
///
/// let tree: Entry = serde_json::from_str(
///     r#"{ "menu": { "file": "File" } }"#
/// ).unwrap();
/// let backend = StaticBackend::new().with_locale("en", tree);
///
/// let entry = backend
///     .translate("en", &Key::path("menu.file"), &Options::none())
///     .unwrap();
/// assert_eq!(entry.as_text(), Some("File"));
/// ```
#[derive(Debug)]
pub struct StaticBackend {
    trees: HashMap<String, Entry>,
    separator: String,
    formatter: DefaultFormatter,
}

impl Default for StaticBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticBackend {
    /// Create an empty backend with the default separator.
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            separator: codec::DEFAULT_SEPARATOR.to_string(),
            formatter: DefaultFormatter,
        }
    }

    /// Add or replace the resource tree for a locale.
    pub fn with_locale(mut self, code: impl Into<String>, tree: Entry) -> Self {
        self.trees.insert(code.into(), tree);
        self
    }

    /// Walk the normalized key path through a locale tree.
    fn resolve(&self, locale: &str, key: &Key, scope: &[String]) -> Option<Entry> {
        let path = codec::normalize_keys(locale, key.as_str(), scope, &self.separator);
        let (first, rest) = path.split_first()?;
        let mut current = self.trees.get(first)?;
        for segment in rest {
            current = current.as_map()?.get(segment)?;
        }
        Some(current.clone())
    }
}

impl Backend for StaticBackend {
    fn translate(
        &self,
        locale: &str,
        key: &Key,
        options: &Options,
    ) -> Result<Entry, TranslateError> {
        let missing = || TranslateError::MissingTranslation {
            locale: locale.to_string(),
            key: key.as_str().to_string(),
        };

        let mut entry = self
            .resolve(locale, key, options.scope())
            .ok_or_else(missing)?;

        // A `{one, other}` mapping is a plural group, not a structural
        // result.
        if let (Entry::Map(map), Some(count)) = (&entry, options.count()) {
            let selected = if count == 1 { "one" } else { "other" };
            entry = map.get(selected).cloned().ok_or_else(missing)?;
        }

        if let Entry::Text(text) = &entry {
            let mut bindings = options.bindings().clone();
            if let Some(count) = options.count() {
                bindings
                    .entry("count".to_string())
                    .or_insert(Value::Number(count));
            }
            entry = Entry::Text(self.formatter.interpolate(text, &bindings));
        }
        Ok(entry)
    }

    fn available_locales(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.trees.keys().cloned().collect();
        codes.sort();
        codes
    }
}
