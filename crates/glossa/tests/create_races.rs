//! Tests for create-on-miss behavior under concurrent-creation races:
//! losing the race must never fail the request.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glossa::store::StoreError;
use glossa::{
    Engine, KeyHash, MemoryCache, MemoryLocales, MemoryStore, Options, SINGULAR_INDEX, Store,
    TranslationRecord,
};

/// Store double simulating a concurrent writer: every create is answered
/// with a duplicate-key conflict after the record is inserted by "the other
/// caller".
struct ContendedStore {
    inner: MemoryStore,
    conflicts: AtomicUsize,
}

impl ContendedStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            conflicts: AtomicUsize::new(0),
        }
    }

    fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }
}

impl Store for ContendedStore {
    fn find_records(
        &self,
        locale: &str,
        key: KeyHash,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        self.inner.find_records(locale, key)
    }

    fn find_children(
        &self,
        locale: &str,
        key_prefix: &str,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        self.inner.find_children(locale, key_prefix)
    }

    fn find_default_locale_record(
        &self,
        key: KeyHash,
        pluralization_index: u8,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        self.inner.find_default_locale_record(key, pluralization_index)
    }

    fn create_record(
        &self,
        locale: &str,
        raw_key: &str,
        value: Option<String>,
        pluralization_index: u8,
    ) -> Result<TranslationRecord, StoreError> {
        self.conflicts.fetch_add(1, Ordering::SeqCst);
        // The competing caller wins: their record lands first, ours
        // conflicts.
        self.inner
            .seed(locale, raw_key, value.as_deref(), pluralization_index);
        Err(StoreError::Duplicate {
            locale: locale.to_string(),
            key: KeyHash::of(raw_key),
            pluralization_index,
        })
    }
}

fn engine(store: Arc<ContendedStore>) -> Engine {
    Engine::builder()
        .store(store)
        .cache(Arc::new(MemoryCache::new()))
        .locales(Arc::new(MemoryLocales::new("en", ["de"])))
        .build()
}

#[test]
fn lost_create_race_rereads_instead_of_failing() {
    let store = Arc::new(ContendedStore::new(MemoryStore::new("en")));
    let engine = engine(Arc::clone(&store));

    // Default locale: the colliding record carries the literal seed, so
    // the re-read resolves it.
    let entry = engine.translate("en", "raced.key", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("raced.key"));
    assert_eq!(store.conflicts(), 1);
}

#[test]
fn lost_backfill_race_is_benign() {
    let inner = MemoryStore::new("en");
    inner.seed("en", "greeting", Some("hi"), SINGULAR_INDEX);
    let store = Arc::new(ContendedStore::new(inner));
    let engine = engine(Arc::clone(&store));

    // The nil-marker creation conflicts, but the default value is still
    // returned.
    let entry = engine.translate("de", "greeting", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("hi"));
    assert_eq!(store.conflicts(), 1);
}

#[test]
fn genuine_store_failure_propagates() {
    struct BrokenStore;

    impl Store for BrokenStore {
        fn find_records(
            &self,
            _locale: &str,
            _key: KeyHash,
        ) -> Result<Vec<TranslationRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn find_children(
            &self,
            _locale: &str,
            _key_prefix: &str,
        ) -> Result<Vec<TranslationRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn find_default_locale_record(
            &self,
            _key: KeyHash,
            _pluralization_index: u8,
        ) -> Result<Option<TranslationRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn create_record(
            &self,
            _locale: &str,
            _raw_key: &str,
            _value: Option<String>,
            _pluralization_index: u8,
        ) -> Result<TranslationRecord, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    let engine = Engine::builder()
        .store(Arc::new(BrokenStore))
        .cache(Arc::new(MemoryCache::new()))
        .locales(Arc::new(MemoryLocales::new("en", ["de"])))
        .build();

    let error = engine.translate("en", "any", Options::none()).unwrap_err();
    assert!(!error.is_missing());
}
