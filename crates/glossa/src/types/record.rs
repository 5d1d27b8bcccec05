use serde::{Deserialize, Serialize};

use crate::codec;
use crate::types::KeyHash;

/// Pluralization index of a singular form (`count` absent or 1).
pub const SINGULAR_INDEX: u8 = 1;

/// Pluralization index of the plural/zero form.
pub const PLURAL_INDEX: u8 = 0;

/// A durable translation row: `(locale, hashed key, pluralization index) ->
/// value`.
///
/// `raw_key` preserves the literal key text, including any escaping syntax,
/// while `key` carries the hashed form the store indexes on. A `None` value
/// is meaningful: the key has been surfaced for this locale but not yet
/// translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Locale code this record belongs to.
    pub locale: String,

    /// Hashed key used for indexed lookup.
    pub key: KeyHash,

    /// Literal, human-readable key, escaping syntax intact.
    pub raw_key: String,

    /// Which plural form this record holds (singular = 1, plural/zero = 0).
    pub pluralization_index: u8,

    /// Translated value; `None` means "known to be untranslated".
    pub value: Option<String>,
}

impl TranslationRecord {
    /// The record's value, or its own literal key text when untranslated.
    ///
    /// An untranslated record falls back to the unescaped literal of its raw
    /// key, so a human-sentence key renders as itself until translated.
    pub fn value_or_default(&self) -> String {
        match &self.value {
            Some(value) => value.clone(),
            None => codec::unescape_without_scope(&self.raw_key, codec::DEFAULT_SEPARATOR)
                .to_string(),
        }
    }

    /// True if no translated value has been supplied yet.
    pub fn untranslated(&self) -> bool {
        self.value.is_none()
    }
}
