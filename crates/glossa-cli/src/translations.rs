//! Loading a translations JSON file into a runnable engine.
//!
//! File shape:
//!
//! ```json
//! {
//!   "default_locale": "en",
//!   "fallbacks": { "de-CH": ["de", "en"] },
//!   "locales": {
//!     "en": { "menu": { "file": "File" }, "msgs": ["%{count} msgs", "one msg"] }
//!   }
//! }
//! ```
//!
//! Locale trees nest arbitrarily; a leaf string is a single translation and
//! a leaf array holds index-addressed plural forms (`null` marks an
//! untranslated form).

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use glossa::{
    Engine, Entry, FallbackConfig, MemoryCache, MemoryLocales, MemoryStore, SINGULAR_INDEX,
};
use miette::{miette, IntoDiagnostic, Result};
use serde::Deserialize;

/// A deserialized translations file.
#[derive(Debug, Deserialize)]
pub struct TranslationsFile {
    /// The default locale; every other locale backfills from it.
    pub default_locale: String,

    /// Configured fallback chains per locale code.
    #[serde(default)]
    pub fallbacks: HashMap<String, Vec<String>>,

    /// Nested translation trees per locale code.
    #[serde(default)]
    pub locales: HashMap<String, Entry>,
}

impl TranslationsFile {
    /// Read and parse a translations file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read translations file {:?}: {}", path, e))?;
        serde_json::from_str(&content)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to parse translations file {:?}: {}", path, e))
    }

    /// All non-default locale codes in the file, sorted.
    pub fn locale_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .locales
            .keys()
            .filter(|code| **code != self.default_locale)
            .cloned()
            .collect();
        codes.sort();
        codes
    }

    /// Flatten every locale tree into dotted-key store records.
    pub fn build_store(&self) -> MemoryStore {
        let store = MemoryStore::new(&self.default_locale);
        let mut codes: Vec<&String> = self.locales.keys().collect();
        codes.sort();
        for code in codes {
            if let Some(tree) = self.locales.get(code) {
                flatten(&store, code, "", tree);
            }
        }
        store
    }

    /// Build a resolution engine over the file's store, locales, and
    /// fallback chains.
    pub fn engine(&self) -> Engine {
        // Fallback targets count as known locales even without a tree.
        let mut others: Vec<String> = self.locale_codes();
        let mentioned: Vec<&String> = self
            .fallbacks
            .iter()
            .flat_map(|(code, chain)| std::iter::once(code).chain(chain.iter()))
            .collect();
        for code in mentioned {
            if *code != self.default_locale && !others.contains(code) {
                others.push(code.clone());
            }
        }
        others.sort();

        Engine::builder()
            .store(Arc::new(self.build_store()))
            .cache(Arc::new(MemoryCache::new()))
            .locales(Arc::new(MemoryLocales::new(
                self.default_locale.clone(),
                others,
            )))
            .fallbacks(
                FallbackConfig::builder()
                    .chains(self.fallbacks.clone())
                    .build(),
            )
            .build()
    }
}

/// Walk a locale tree, seeding a record per leaf under its dotted path.
fn flatten(store: &MemoryStore, locale: &str, prefix: &str, entry: &Entry) {
    match entry {
        Entry::Text(text) => {
            if !prefix.is_empty() {
                store.seed(locale, prefix, Some(text), SINGULAR_INDEX);
            }
        }
        Entry::Forms(forms) => {
            if !prefix.is_empty() {
                for (index, form) in forms.iter().enumerate() {
                    store.seed(locale, prefix, form.as_deref(), index as u8);
                }
            }
        }
        Entry::Map(map) => {
            for (segment, child) in map {
                let path = if prefix.is_empty() {
                    segment.clone()
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(store, locale, &path, child);
            }
        }
    }
}
