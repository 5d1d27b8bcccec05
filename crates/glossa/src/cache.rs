//! The memoization cache interface and an in-memory implementation.
//!
//! Existence of a cache entry, not the nullity of its value, is the
//! authoritative "do we already know this" signal. A `None` value is a
//! meaningful sentinel ("definitively no translation exists") and must
//! short-circuit further store lookups.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::types::{Entry, KeyHash};

/// Deterministic cache key for `(locale code, key)`.
///
/// ```
/// use glossa::cache::cache_key;
///
/// let a = cache_key("de", "greeting");
/// assert_eq!(a, cache_key("de", "greeting"));
/// assert_ne!(a, cache_key("en", "greeting"));
/// ```
pub fn cache_key(locale: &str, key: &str) -> String {
    format!("{locale}:{}", KeyHash::of(key))
}

/// A namespaced key -> value memo with an explicit existence check.
///
/// Implementations must be safe for concurrent use and must preserve the
/// absent / present-but-nil distinction.
pub trait Cache: Send + Sync {
    /// True if an entry exists under `key`, even one holding the nil
    /// sentinel.
    fn exists(&self, key: &str) -> bool;

    /// The cached value; `None` both when absent and for the nil sentinel.
    /// Callers distinguish the two via [`Cache::exists`].
    fn read(&self, key: &str) -> Option<Entry>;

    /// Create or overwrite an entry. A `None` value is stored as the nil
    /// sentinel and must be retrievable as "known absent".
    fn write(&self, key: &str, value: Option<Entry>);
}

/// An in-memory [`Cache`] backed by a `RwLock`ed map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Option<Entry>>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries, nil sentinels included.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    /// True if nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .contains_key(key)
    }

    fn read(&self, key: &str) -> Option<Entry> {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
            .flatten()
    }

    fn write(&self, key: &str, value: Option<Entry>) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), value);
    }
}
