//! The persistent translation store interface and an in-memory
//! implementation.
//!
//! The engine only ever creates records or reads their values; deletion and
//! editing are external concerns. The store enforces uniqueness on
//! `(locale, hashed key, pluralization index)` and reports violations as
//! [`StoreError::Duplicate`], which the engine treats as "someone else
//! already created it" and recovers by re-reading.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::types::{KeyHash, TranslationRecord};

/// Errors surfaced by a translation store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record already exists for `(locale, key, pluralization_index)`.
    #[error("duplicate record for locale '{locale}', key {key}, index {pluralization_index}")]
    Duplicate {
        locale: String,
        key: KeyHash,
        pluralization_index: u8,
    },

    /// The backing storage failed or is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable lookup and creation of translation records.
///
/// Implementations must be safe for concurrent use; the engine performs no
/// synchronization of its own around store calls.
pub trait Store: Send + Sync {
    /// All records for `(locale, hashed key)`, across pluralization indices.
    fn find_records(
        &self,
        locale: &str,
        key: KeyHash,
    ) -> Result<Vec<TranslationRecord>, StoreError>;

    /// All records whose raw key has `key_prefix` as a dotted prefix,
    /// i.e. raw keys starting with `<key_prefix>.`. Any storage-specific
    /// quoting of the prefix is the implementation's concern.
    fn find_children(
        &self,
        locale: &str,
        key_prefix: &str,
    ) -> Result<Vec<TranslationRecord>, StoreError>;

    /// The default-locale record for a key and pluralization index, if any.
    fn find_default_locale_record(
        &self,
        key: KeyHash,
        pluralization_index: u8,
    ) -> Result<Option<TranslationRecord>, StoreError>;

    /// Create a record. Fails with [`StoreError::Duplicate`] if one already
    /// exists for `(locale, raw_key, pluralization_index)`.
    fn create_record(
        &self,
        locale: &str,
        raw_key: &str,
        value: Option<String>,
        pluralization_index: u8,
    ) -> Result<TranslationRecord, StoreError>;

    /// The record for `(locale, hashed key, pluralization index)`, if any.
    fn find_record(
        &self,
        locale: &str,
        key: KeyHash,
        pluralization_index: u8,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        Ok(self
            .find_records(locale, key)?
            .into_iter()
            .find(|record| record.pluralization_index == pluralization_index))
    }
}

/// An in-memory [`Store`], suitable for tests, tooling, and single-process
/// deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    default_locale: String,
    records: RwLock<HashMap<(String, u64, u8), TranslationRecord>>,
}

impl MemoryStore {
    /// Create an empty store whose default locale is `default_locale`.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a translated record, overwriting any existing one. Intended for
    /// loading fixtures and translation files, not for use by the engine.
    pub fn seed(
        &self,
        locale: &str,
        raw_key: &str,
        value: Option<&str>,
        pluralization_index: u8,
    ) {
        let key = KeyHash::of(raw_key);
        let record = TranslationRecord {
            locale: locale.to_string(),
            key,
            raw_key: raw_key.to_string(),
            pluralization_index,
            value: value.map(ToString::to_string),
        };
        let mut records = self.records.write().expect("store lock poisoned");
        records.insert(
            (locale.to_string(), key.as_u64(), pluralization_index),
            record,
        );
    }

    /// Every record for a locale, ordered by raw key then pluralization
    /// index. Listing API for tooling; not part of the [`Store`] contract.
    pub fn records_for_locale(&self, locale: &str) -> Vec<TranslationRecord> {
        let records = self.records.read().expect("store lock poisoned");
        let mut found: Vec<TranslationRecord> = records
            .values()
            .filter(|record| record.locale == locale)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (&a.raw_key, a.pluralization_index).cmp(&(&b.raw_key, b.pluralization_index))
        });
        found
    }

    /// Every distinct locale code with at least one record.
    pub fn locales(&self) -> Vec<String> {
        let records = self.records.read().expect("store lock poisoned");
        let mut codes: Vec<String> = records.values().map(|r| r.locale.clone()).collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

impl Store for MemoryStore {
    fn find_records(
        &self,
        locale: &str,
        key: KeyHash,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        let records = self.records.read().expect("store lock poisoned");
        let mut found: Vec<TranslationRecord> = records
            .values()
            .filter(|record| record.locale == locale && record.key == key)
            .cloned()
            .collect();
        found.sort_by_key(|record| record.pluralization_index);
        Ok(found)
    }

    fn find_children(
        &self,
        locale: &str,
        key_prefix: &str,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        let prefix = format!("{key_prefix}.");
        let records = self.records.read().expect("store lock poisoned");
        let mut found: Vec<TranslationRecord> = records
            .values()
            .filter(|record| record.locale == locale && record.raw_key.starts_with(&prefix))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.raw_key.cmp(&b.raw_key));
        Ok(found)
    }

    fn find_default_locale_record(
        &self,
        key: KeyHash,
        pluralization_index: u8,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        self.find_record(&self.default_locale, key, pluralization_index)
    }

    fn create_record(
        &self,
        locale: &str,
        raw_key: &str,
        value: Option<String>,
        pluralization_index: u8,
    ) -> Result<TranslationRecord, StoreError> {
        let key = KeyHash::of(raw_key);
        let mut records = self.records.write().expect("store lock poisoned");
        let slot = (locale.to_string(), key.as_u64(), pluralization_index);
        if records.contains_key(&slot) {
            return Err(StoreError::Duplicate {
                locale: locale.to_string(),
                key,
                pluralization_index,
            });
        }
        let record = TranslationRecord {
            locale: locale.to_string(),
            key,
            raw_key: raw_key.to_string(),
            pluralization_index,
            value,
        };
        records.insert(slot, record.clone());
        Ok(record)
    }
}
