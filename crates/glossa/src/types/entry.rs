use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A resolved translation value.
///
/// Most lookups produce `Text`. A key stored with multiple pluralization
/// indices resolves to `Forms`, an index-addressed list of plural forms with
/// gaps allowed. A hierarchy expansion (a miss on a parent key with children
/// in the store) resolves to `Map`.
///
/// The serde representation is untagged so nested locale trees read
/// naturally from JSON: strings become `Text`, arrays become `Forms`,
/// objects become `Map`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// A single resolved string.
    Text(String),
    /// Plural forms indexed by pluralization index; `None` marks a gap.
    Forms(Vec<Option<String>>),
    /// A nested mapping assembled from children of a hierarchical key.
    Map(BTreeMap<String, Entry>),
}

impl Entry {
    /// Get this entry as a single string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this entry's plural forms, if it has any.
    pub fn as_forms(&self) -> Option<&[Option<String>]> {
        match self {
            Entry::Forms(forms) => Some(forms),
            _ => None,
        }
    }

    /// Get this entry as a nested mapping, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Entry>> {
        match self {
            Entry::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Entry {
    fn from(s: &str) -> Self {
        Entry::Text(s.to_string())
    }
}

impl From<String> for Entry {
    fn from(s: String) -> Self {
        Entry::Text(s)
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Text(s) => f.write_str(s),
            Entry::Forms(forms) => {
                let joined: Vec<&str> = forms
                    .iter()
                    .filter_map(|form| form.as_deref())
                    .collect();
                f.write_str(&joined.join(" | "))
            }
            Entry::Map(map) => {
                let mut first = true;
                f.write_str("{")?;
                for (key, value) in map {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                    first = false;
                }
                f.write_str("}")
            }
        }
    }
}
