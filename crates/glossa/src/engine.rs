//! The translation resolution engine.
//!
//! [`Engine::translate`] turns `(locale, key, options)` into a resolved
//! [`Entry`], driving the key codec, fallback resolver, cache, and store:
//! primary lookup, fallback-locale traversal, default-locale backfill, the
//! default-value chain, hierarchy expansion, and create-on-miss, followed by
//! pluralization and interpolation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use bon::Builder;
use tracing::debug;

use crate::cache::{Cache, cache_key};
use crate::codec;
use crate::error::TranslateError;
use crate::fallback::FallbackConfig;
use crate::format::{DefaultFormatter, Formatter};
use crate::locales::LocaleProvider;
use crate::store::{Store, StoreError};
use crate::types::{Entry, Key, KeyHash, Locale, SINGULAR_INDEX, TranslationRecord, Value};

/// A default-value candidate: another key to try, or literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A symbolic key to resolve next.
    Path(String),
    /// Literal text, resolved as a text key (so it ultimately yields
    /// itself via create-on-miss).
    Text(String),
}

impl DefaultValue {
    fn into_key(self) -> Key {
        match self {
            DefaultValue::Path(s) => Key::Path(s),
            DefaultValue::Text(s) => Key::Text(s),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::Text(s.to_string())
    }
}

/// The `default` option: a single candidate or an ordered candidate list.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultArg {
    /// One fallback candidate.
    One(DefaultValue),
    /// Ordered fallback candidates, tried front to back.
    Many(Vec<DefaultValue>),
}

impl DefaultArg {
    /// Split off the next candidate; the remainder (if any) stays in the
    /// options for the recursive call.
    fn pop(self) -> (DefaultValue, Option<DefaultArg>) {
        match self {
            DefaultArg::One(value) => (value, None),
            DefaultArg::Many(mut list) => {
                let value = list.remove(0);
                let rest = if list.is_empty() {
                    None
                } else {
                    Some(DefaultArg::Many(list))
                };
                (value, rest)
            }
        }
    }

    /// True for the single-space scalar, the documented legacy
    /// accommodation for literal text keys.
    fn is_single_space(&self) -> bool {
        matches!(self, DefaultArg::One(DefaultValue::Text(s)) if s == " ")
    }
}

/// Per-call translation options.
///
/// # Example
///
/// ```
/// use glossa::{Options, bindings};
///
/// let options = Options::builder()
///     .count(5)
///     .bindings(bindings! { "name" => "Alice" })
///     .build();
/// assert_eq!(options.count(), Some(5));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct Options {
    /// Namespace segments folded into symbolic keys before lookup.
    #[builder(default)]
    scope: Vec<String>,

    /// Pluralization selector.
    count: Option<i64>,

    /// Fallback candidate(s) tried when nothing resolves.
    default: Option<DefaultArg>,

    /// Interpolation bindings. `count`, when set, is bound automatically.
    #[builder(default)]
    bindings: HashMap<String, Value>,
}

impl Options {
    /// Empty options.
    pub fn none() -> Self {
        Self::default()
    }

    /// The pluralization selector, if any.
    pub fn count(&self) -> Option<i64> {
        self.count
    }

    /// The namespace scope segments.
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// The interpolation bindings.
    pub fn bindings(&self) -> &HashMap<String, Value> {
        &self.bindings
    }
}

/// Outcome of a cache-then-store read.
struct LookupOutcome {
    /// The resolved value; `None` both on a nil cache sentinel and on a
    /// store miss.
    value: Option<Entry>,
    /// True when the cache already had an entry, nil sentinel included.
    cache_hit: bool,
}

/// The resolution engine.
///
/// All collaborators are injected at construction; the engine itself holds
/// no ambient global state. It is shareable across threads as long as the
/// injected store and cache are, and its multi-step sequences are not atomic
/// across collaborators: concurrent create-on-miss races are recovered via
/// the store's uniqueness constraint.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use glossa::{Engine, MemoryCache, MemoryLocales, MemoryStore, Options};
///
/// let store = Arc::new(MemoryStore::new("en"));
/// store.seed("en", "greeting", Some("hello"), 1);
///
/// let engine = Engine::builder()
///     .store(store)
///     .cache(Arc::new(MemoryCache::new()))
///     .locales(Arc::new(MemoryLocales::new("en", ["de"])))
///     .build();
///
/// let entry = engine.translate("en", "greeting", Options::none()).unwrap();
/// assert_eq!(entry.as_text(), Some("hello"));
/// ```
#[derive(Builder)]
pub struct Engine {
    /// Durable translation records.
    store: Arc<dyn Store>,

    /// Write-through memo for resolved values.
    cache: Arc<dyn Cache>,

    /// Host locale objects.
    locales: Arc<dyn LocaleProvider>,

    /// Fallback chains per locale.
    #[builder(default)]
    fallbacks: FallbackConfig,

    /// Pluggable interpolation/pluralization formatter.
    #[builder(default = Arc::new(DefaultFormatter) as Arc<dyn Formatter>)]
    formatter: Arc<dyn Formatter>,

    /// Scope separator for key paths.
    #[builder(default = codec::DEFAULT_SEPARATOR.to_string(), into)]
    separator: String,

    /// Process-wide locale memo, append-only for the engine's lifetime.
    #[builder(skip)]
    locale_memo: RwLock<HashMap<String, Locale>>,
}

impl Engine {
    /// Resolve a key for a locale.
    ///
    /// Returns the final interpolated [`Entry`], or a structural
    /// [`Entry::Map`] for hierarchy expansions, or
    /// [`TranslateError::MissingTranslation`] when nothing resolves and no
    /// default was usable.
    pub fn translate(
        &self,
        locale: &str,
        key: impl Into<Key>,
        options: Options,
    ) -> Result<Entry, TranslateError> {
        self.translate_key(locale, key.into(), options)
    }

    /// Resolve a key, substituting `fallback` on a missing translation.
    ///
    /// The explicit replacement for rescue-driven fallback lookups such as
    /// number-format delimiters.
    pub fn translate_or(
        &self,
        locale: &str,
        key: impl Into<Key>,
        options: Options,
        fallback: impl Into<Entry>,
    ) -> Result<Entry, TranslateError> {
        match self.translate(locale, key, options) {
            Err(error) if error.is_missing() => Ok(fallback.into()),
            other => other,
        }
    }

    /// The default-locale value for a key and pluralization index, or
    /// `fallback` (unescaped of scope) when no translated value exists.
    pub fn default_locale_value(
        &self,
        key: &str,
        pluralization_index: u8,
        fallback: &str,
    ) -> Result<String, TranslateError> {
        let record = self
            .store
            .find_default_locale_record(KeyHash::of(key), pluralization_index)?;
        Ok(record.and_then(|r| r.value).unwrap_or_else(|| {
            codec::unescape_without_scope(fallback, &self.separator).to_string()
        }))
    }

    /// All locale codes known to the locale provider.
    pub fn available_locales(&self) -> Vec<String> {
        self.locales.available_locales()
    }

    fn translate_key(
        &self,
        locale_code: &str,
        mut key: Key,
        mut options: Options,
    ) -> Result<Entry, TranslateError> {
        let mut locale = self.locale_in_context(locale_code)?;

        if let Some(DefaultArg::Many(list)) = &options.default
            && list.is_empty()
        {
            return Err(TranslateError::AmbiguousDefaultArguments);
        }

        // Fold scope segments into symbolic keys; literal text keys keep
        // their scope out of the path (escaped keys carry their own).
        if !options.scope.is_empty() && !key.is_text() {
            let folded = format!(
                "{}{}{}",
                options.scope.join(&self.separator),
                self.separator,
                key.as_str()
            );
            key = Key::Path(folded);
            options.scope.clear();
        }
        let count = options.count;

        // Primary lookup in the requested locale.
        let primary = self.lookup(&locale, key.as_str())?;
        let primary_hit = primary.cache_hit;
        let mut entry = primary.value;

        // Fallback chain: first non-empty result wins and its locale
        // becomes the effective locale for the rest of the call.
        if entry.is_none() {
            for fallback_code in self.fallbacks.fallback_chain(locale_code) {
                if fallback_code == locale.code() {
                    continue;
                }
                let fallback_locale = self.locale_in_context(&fallback_code)?;
                let outcome = self.lookup(&fallback_locale, key.as_str())?;
                if outcome.value.is_some() {
                    debug!(key = key.as_str(), from = locale_code, to = %fallback_code, "fallback locale adopted");
                    locale = fallback_locale;
                    entry = outcome.value;
                    break;
                }
            }
        }

        // A successful lookup already wrote (or found) the cache entry; a
        // found-but-nil cache sentinel also counts.
        let cache_lookup = primary_hit || entry.is_some();

        // Default-locale backfill: surface the key for this locale with
        // nil-valued records and answer with the default-locale value.
        if entry.is_none() && !locale.is_default() {
            entry = self.use_and_copy_default_locale(&locale, key.as_str())?;
        }

        // Default-value chain for symbolic keys.
        if entry.is_none() && !key.is_text() && options.default.is_some() {
            return self.recurse_with_default(&locale, options);
        }

        // Single-space default for literal text keys, kept for legacy
        // callers.
        if entry.is_none()
            && key.is_text()
            && options.default.as_ref().is_some_and(DefaultArg::is_single_space)
        {
            return self.recurse_with_default(&locale, options);
        }

        // Hierarchy expansion: a miss on a parent key assembles its
        // children into a nested mapping. Pluralization and interpolation
        // never apply to a structural result.
        if entry.is_none() {
            let children = self.store.find_children(locale.code(), key.as_str())?;
            if !children.is_empty() {
                debug!(key = key.as_str(), children = children.len(), "hierarchy expansion");
                let map = self.hashify(key.as_str(), &children);
                let assembled = Entry::Map(map);
                if !cache_lookup {
                    self.cache.write(
                        &cache_key(locale.code(), key.as_str()),
                        Some(assembled.clone()),
                    );
                }
                return Ok(assembled);
            }
        }

        // Create-on-miss: look up or create the record for this plural
        // index. Only the default locale seeds the literal key text as the
        // value; other locales get a nil-valued marker. A literal text key
        // still resolves to its own unescaped text in any locale, so
        // literal default candidates work outside the default locale.
        if entry.is_none() {
            let index = self.formatter.plural_index(count);
            let record = self.find_or_create_record(&locale, &key, index)?;
            entry = if key.is_text() {
                Some(Entry::Text(record.value_or_default()))
            } else {
                record.value.map(Entry::Text)
            };
        }

        let Some(entry) = entry else {
            return Err(TranslateError::MissingTranslation {
                locale: locale.code().to_string(),
                key: key.as_str().to_string(),
            });
        };

        // Write-through under the effective locale, unless the value came
        // out of the cache in the first place.
        if !cache_lookup {
            self.cache.write(
                &cache_key(locale.code(), key.as_str()),
                Some(entry.clone()),
            );
        }

        let entry = self.pluralize(&locale, entry, count, key.as_str())?;
        Ok(self.interpolate(entry, &options))
    }

    /// Cache-then-store read: the cache's existence check is
    /// authoritative, a nil sentinel short-circuits the store, and a store
    /// miss writes the nil sentinel back.
    fn lookup(&self, locale: &Locale, key: &str) -> Result<LookupOutcome, TranslateError> {
        let ck = cache_key(locale.code(), key);
        if self.cache.exists(&ck) {
            debug!(locale = locale.code(), key, "cache hit");
            let value = self.cache.read(&ck);
            return Ok(LookupOutcome {
                value: value.map(|entry| self.unescape_entry(entry)),
                cache_hit: true,
            });
        }

        let records = self.store.find_records(locale.code(), KeyHash::of(key))?;
        let value = match records.len() {
            0 => None,
            1 => Some(Entry::Text(records[0].value_or_default())),
            _ => {
                let top = records
                    .iter()
                    .map(|record| record.pluralization_index as usize)
                    .max()
                    .unwrap_or(0);
                let mut forms: Vec<Option<String>> = vec![None; top + 1];
                for record in &records {
                    forms[record.pluralization_index as usize] =
                        Some(record.value_or_default());
                }
                Some(Entry::Forms(forms))
            }
        };

        // A nil write is meaningful: "known absent" for the next caller.
        self.cache.write(&ck, value.clone());
        Ok(LookupOutcome {
            value: value.map(|entry| self.unescape_entry(entry)),
            cache_hit: false,
        })
    }

    /// Unescape stored values on the way out. Plural forms are unescaped
    /// per element; structural mappings pass through.
    fn unescape_entry(&self, entry: Entry) -> Entry {
        match entry {
            Entry::Text(text) => {
                Entry::Text(codec::unescape_without_scope(&text, &self.separator).to_string())
            }
            Entry::Forms(forms) => Entry::Forms(
                forms
                    .into_iter()
                    .map(|form| {
                        form.map(|text| {
                            codec::unescape_without_scope(&text, &self.separator).to_string()
                        })
                    })
                    .collect(),
            ),
            Entry::Map(map) => Entry::Map(map),
        }
    }

    /// Default-locale lookup plus backfill: when the default locale
    /// has a value, nil-valued records are created for the current locale as
    /// untranslated markers, and the default value is adopted.
    fn use_and_copy_default_locale(
        &self,
        locale: &Locale,
        key: &str,
    ) -> Result<Option<Entry>, TranslateError> {
        let default_locale = self.locales.default_locale();
        let outcome = self.lookup(&default_locale, key)?;
        let Some(entry) = outcome.value else {
            return Ok(None);
        };

        debug!(locale = locale.code(), key, "default-locale backfill");
        match &entry {
            Entry::Forms(forms) => {
                for (index, form) in forms.iter().enumerate() {
                    if form.is_some() {
                        self.create_record_recovering(locale, key, None, index as u8)?;
                    }
                }
            }
            _ => {
                self.create_record_recovering(locale, key, None, SINGULAR_INDEX)?;
            }
        }
        Ok(Some(entry))
    }

    /// Pop the next default candidate and recurse with the remainder.
    fn recurse_with_default(
        &self,
        locale: &Locale,
        mut options: Options,
    ) -> Result<Entry, TranslateError> {
        let arg = options
            .default
            .take()
            .ok_or(TranslateError::AmbiguousDefaultArguments)?;
        let (candidate, rest) = arg.pop();
        options.default = rest;
        let code = locale.code().to_string();
        self.translate_key(&code, candidate.into_key(), options)
    }

    /// Look up the record for this plural index, creating it if absent.
    /// A duplicate-key conflict means another caller created it first;
    /// re-read instead of failing the request.
    fn find_or_create_record(
        &self,
        locale: &Locale,
        key: &Key,
        pluralization_index: u8,
    ) -> Result<TranslationRecord, TranslateError> {
        if let Some(record) =
            self.store
                .find_record(locale.code(), key.hash(), pluralization_index)?
        {
            return Ok(record);
        }

        let seed = locale.is_default().then(|| {
            codec::unescape_without_scope(key.as_str(), &self.separator).to_string()
        });
        debug!(
            locale = locale.code(),
            key = key.as_str(),
            pluralization_index,
            "create on miss"
        );
        match self
            .store
            .create_record(locale.code(), key.as_str(), seed, pluralization_index)
        {
            Ok(record) => Ok(record),
            Err(StoreError::Duplicate { .. }) => {
                debug!(key = key.as_str(), "lost create race, re-reading");
                self.store
                    .find_record(locale.code(), key.hash(), pluralization_index)?
                    .ok_or_else(|| TranslateError::MissingTranslation {
                        locale: locale.code().to_string(),
                        key: key.as_str().to_string(),
                    })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Create a record, treating a duplicate-key conflict as already done.
    fn create_record_recovering(
        &self,
        locale: &Locale,
        raw_key: &str,
        value: Option<String>,
        pluralization_index: u8,
    ) -> Result<(), TranslateError> {
        match self
            .store
            .create_record(locale.code(), raw_key, value, pluralization_index)
        {
            Ok(_) | Err(StoreError::Duplicate { .. }) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    /// Assemble children records into a nested mapping keyed by the
    /// relative suffix path under `prefix`.
    fn hashify(&self, prefix: &str, records: &[TranslationRecord]) -> BTreeMap<String, Entry> {
        let dotted = format!("{prefix}{}", self.separator);
        let mut root = BTreeMap::new();
        for record in records {
            let suffix = record
                .raw_key
                .strip_prefix(&dotted)
                .unwrap_or(&record.raw_key);
            let parts: Vec<&str> = suffix
                .split(&self.separator)
                .filter(|part| !part.is_empty())
                .collect();
            if parts.is_empty() {
                continue;
            }
            insert_nested(&mut root, &parts, record.value_or_default());
        }
        root
    }

    /// Two-form plural selection against a resolved value.
    fn pluralize(
        &self,
        locale: &Locale,
        entry: Entry,
        count: Option<i64>,
        key: &str,
    ) -> Result<Entry, TranslateError> {
        let (Entry::Forms(forms), Some(count)) = (&entry, count) else {
            return Ok(entry);
        };
        let index = self.formatter.plural_index(Some(count)) as usize;
        match forms.get(index).cloned().flatten() {
            Some(form) => Ok(Entry::Text(form)),
            // A gap in the plural forms degrades to the missing signal.
            None => Err(TranslateError::MissingTranslation {
                locale: locale.code().to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Interpolate bindings (plus `count`) into a textual result.
    fn interpolate(&self, entry: Entry, options: &Options) -> Entry {
        let Entry::Text(text) = &entry else {
            return entry;
        };
        let mut bindings = options.bindings.clone();
        if let Some(count) = options.count {
            bindings
                .entry("count".to_string())
                .or_insert(Value::Number(count));
        }
        Entry::Text(self.formatter.interpolate(text, &bindings))
    }

    /// Locale objects memoized per code for the engine's lifetime
    /// (read-mostly, append-only).
    fn locale_in_context(&self, code: &str) -> Result<Locale, TranslateError> {
        if let Some(locale) = self
            .locale_memo
            .read()
            .expect("locale memo lock poisoned")
            .get(code)
        {
            return Ok(locale.clone());
        }
        let locale =
            self.locales
                .find_by_code(code)
                .ok_or_else(|| TranslateError::InvalidLocale {
                    code: code.to_string(),
                })?;
        self.locale_memo
            .write()
            .expect("locale memo lock poisoned")
            .insert(code.to_string(), locale.clone());
        Ok(locale)
    }
}

/// Insert a value at a nested path, materializing intermediate maps.
fn insert_nested(map: &mut BTreeMap<String, Entry>, parts: &[&str], value: String) {
    let [head, rest @ ..] = parts else {
        return;
    };
    if rest.is_empty() {
        map.insert((*head).to_string(), Entry::Text(value));
        return;
    }
    let child = map
        .entry((*head).to_string())
        .or_insert_with(|| Entry::Map(BTreeMap::new()));
    if !matches!(child, Entry::Map(_)) {
        *child = Entry::Map(BTreeMap::new());
    }
    if let Entry::Map(child_map) = child {
        insert_nested(child_map, rest, value);
    }
}
