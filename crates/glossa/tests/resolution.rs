//! Integration tests for the core resolution flow: primary lookup,
//! fallback-locale traversal, default-locale backfill, and the missing
//! signal.

use std::sync::Arc;

use glossa::{
    Engine, FallbackConfig, MemoryCache, MemoryLocales, MemoryStore, Options, SINGULAR_INDEX,
    TranslateError, bindings,
};

fn engine_with(store: Arc<MemoryStore>, fallbacks: FallbackConfig) -> Engine {
    Engine::builder()
        .store(store)
        .cache(Arc::new(MemoryCache::new()))
        .locales(Arc::new(MemoryLocales::new("en", ["de", "fr", "it"])))
        .fallbacks(fallbacks)
        .build()
}

// =============================================================================
// Primary Lookup
// =============================================================================

#[test]
fn resolves_direct_hit() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("de", "greeting", Some("hallo"), SINGULAR_INDEX);
    let engine = engine_with(store, FallbackConfig::new());

    let entry = engine.translate("de", "greeting", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("hallo"));
}

#[test]
fn interpolates_bindings() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("en", "welcome", Some("Welcome, %{name}!"), SINGULAR_INDEX);
    let engine = engine_with(store, FallbackConfig::new());

    let options = Options::builder()
        .bindings(bindings! { "name" => "Alice" })
        .build();
    let entry = engine.translate("en", "welcome", options).unwrap();
    assert_eq!(entry.as_text(), Some("Welcome, Alice!"));
}

#[test]
fn scope_folds_into_symbolic_key() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("en", "app.buttons.save", Some("Save"), SINGULAR_INDEX);
    let engine = engine_with(store, FallbackConfig::new());

    let options = Options::builder()
        .scope(vec!["app".to_string(), "buttons".to_string()])
        .build();
    let entry = engine.translate("en", "save", options).unwrap();
    assert_eq!(entry.as_text(), Some("Save"));
}

#[test]
fn invalid_locale_is_fatal() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(store, FallbackConfig::new());

    let error = engine.translate("xx", "greeting", Options::none()).unwrap_err();
    assert!(matches!(error, TranslateError::InvalidLocale { code } if code == "xx"));
}

// =============================================================================
// Fallback Chain
// =============================================================================

#[test]
fn fallback_order_first_hit_wins() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("it", "color", Some("colore"), SINGULAR_INDEX);
    let fallbacks = FallbackConfig::new().with_chain("de", ["fr", "it"]);
    let engine = engine_with(store, fallbacks);

    let entry = engine.translate("de", "color", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("colore"));
}

#[test]
fn fallback_adopts_effective_locale_for_pluralization() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("it", "items", Some("un elemento"), SINGULAR_INDEX);
    store.seed("it", "items", Some("%{count} elementi"), 0);
    let fallbacks = FallbackConfig::new().with_chain("de", ["fr", "it"]);
    let engine = engine_with(store, fallbacks);

    let options = Options::builder().count(5).build();
    let entry = engine.translate("de", "items", options).unwrap();
    assert_eq!(entry.as_text(), Some("5 elementi"));
}

#[test]
fn earlier_fallback_shadows_later() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("fr", "color", Some("couleur"), SINGULAR_INDEX);
    store.seed("it", "color", Some("colore"), SINGULAR_INDEX);
    let fallbacks = FallbackConfig::new().with_chain("de", ["fr", "it"]);
    let engine = engine_with(store, fallbacks);

    let entry = engine.translate("de", "color", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("couleur"));
}

// =============================================================================
// Default-Locale Backfill
// =============================================================================

#[test]
fn backfill_returns_default_value_and_marks_untranslated() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("en", "greeting", Some("hi"), SINGULAR_INDEX);
    let engine = engine_with(Arc::clone(&store), FallbackConfig::new());

    let entry = engine.translate("de", "greeting", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("hi"));

    // A nil-valued marker record now exists for the requested locale.
    let records = store.records_for_locale("de");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].raw_key, "greeting");
    assert_eq!(records[0].pluralization_index, SINGULAR_INDEX);
    assert!(records[0].untranslated());
}

#[test]
fn backfill_copies_each_plural_form_index() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("en", "items", Some("one item"), SINGULAR_INDEX);
    store.seed("en", "items", Some("%{count} items"), 0);
    let engine = engine_with(Arc::clone(&store), FallbackConfig::new());

    let entry = engine
        .translate("de", "items", Options::builder().count(3).build())
        .unwrap();
    assert_eq!(entry.as_text(), Some("3 items"));

    let records = store.records_for_locale("de");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(glossa::TranslationRecord::untranslated));
}

#[test]
fn default_locale_does_not_backfill_itself() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(Arc::clone(&store), FallbackConfig::new());

    // Default locale miss: create-on-miss seeds the literal key text.
    let entry = engine.translate("en", "brand.new", Options::none()).unwrap();
    assert_eq!(entry.as_text(), Some("brand.new"));

    let records = store.records_for_locale("en");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value.as_deref(), Some("brand.new"));
}

// =============================================================================
// Missing Signal
// =============================================================================

#[test]
fn missing_with_no_default_signals_not_panics() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(store, FallbackConfig::new());

    let error = engine.translate("de", "nope", Options::none()).unwrap_err();
    assert!(error.is_missing());
    assert!(matches!(
        error,
        TranslateError::MissingTranslation { locale, key } if locale == "de" && key == "nope"
    ));
}

#[test]
fn missing_key_leaves_untranslated_marker() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(Arc::clone(&store), FallbackConfig::new());

    let _ = engine.translate("de", "nope", Options::none());
    let records = store.records_for_locale("de");
    assert_eq!(records.len(), 1);
    assert!(records[0].untranslated());
}

// =============================================================================
// Explicit Fallback Helpers
// =============================================================================

#[test]
fn translate_or_substitutes_on_missing() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(store, FallbackConfig::new());

    let entry = engine
        .translate_or("de", "nope", Options::none(), "-")
        .unwrap();
    assert_eq!(entry.as_text(), Some("-"));
}

#[test]
fn translate_or_prefers_the_resolved_value() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("de", "sep", Some(","), SINGULAR_INDEX);
    let engine = engine_with(store, FallbackConfig::new());

    let entry = engine
        .translate_or("de", "sep", Options::none(), "-")
        .unwrap();
    assert_eq!(entry.as_text(), Some(","));
}

#[test]
fn translate_or_propagates_hard_errors() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(store, FallbackConfig::new());

    let error = engine
        .translate_or("xx", "any", Options::none(), "-")
        .unwrap_err();
    assert!(matches!(error, TranslateError::InvalidLocale { .. }));
}

#[test]
fn default_locale_value_reads_the_default_record() {
    let store = Arc::new(MemoryStore::new("en"));
    store.seed("en", "greeting", Some("hello"), SINGULAR_INDEX);
    let engine = engine_with(store, FallbackConfig::new());

    let value = engine
        .default_locale_value("greeting", SINGULAR_INDEX, "fallback")
        .unwrap();
    assert_eq!(value, "hello");
}

#[test]
fn default_locale_value_unescapes_the_fallback() {
    let store = Arc::new(MemoryStore::new("en"));
    let engine = engine_with(store, FallbackConfig::new());

    let value = engine
        .default_locale_value("unknown", SINGULAR_INDEX, r#"foo."A. Sentence.""#)
        .unwrap();
    assert_eq!(value, "A. Sentence.");
}
