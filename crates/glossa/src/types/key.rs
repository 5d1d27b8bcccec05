use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A translation key as supplied by a caller.
///
/// The two shapes resolve differently:
///
/// - `Path` is a symbolic, possibly dotted key (`"number.format.delimiter"`).
///   Scope segments are folded into it, and the default-value chain applies.
/// - `Text` is a literal, human-readable key (`"Save changes"`). Scope is
///   never folded into it, and only the single-space default accommodation
///   applies.
///
/// # Example
///
/// ```
/// use glossa::Key;
///
/// let path = Key::path("menu.file");
/// let text = Key::text("Save changes");
/// assert!(!path.is_text());
/// assert!(text.is_text());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A symbolic dotted-path key.
    Path(String),
    /// A literal text key.
    Text(String),
}

impl Key {
    /// Create a symbolic path key.
    pub fn path(key: impl Into<String>) -> Self {
        Key::Path(key.into())
    }

    /// Create a literal text key.
    pub fn text(key: impl Into<String>) -> Self {
        Key::Text(key.into())
    }

    /// The raw key string, regardless of shape.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Path(s) | Key::Text(s) => s,
        }
    }

    /// True if this is a literal text key.
    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }

    /// The hashed form used for indexed store lookup.
    pub fn hash(&self) -> KeyHash {
        KeyHash::of(self.as_str())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Path(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Path(s)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized, hashed form of a translation key.
///
/// `KeyHash` wraps a 64-bit FNV-1a hash of the raw key string. The store
/// indexes records by this hash rather than by the raw key, which keeps
/// lookups cheap for long human-sentence keys while `raw_key` on the record
/// preserves the literal text.
///
/// # Example
///
/// ```
/// use glossa::KeyHash;
///
/// const DELIMITER: KeyHash = KeyHash::of("number.format.delimiter");
/// assert_eq!(DELIMITER, KeyHash::of("number.format.delimiter"));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyHash(u64);

impl KeyHash {
    /// Hash a raw key string. `const fn`, so hashes can be computed at
    /// compile time.
    pub const fn of(raw_key: &str) -> Self {
        Self(fnv1a_hash_str_64(raw_key))
    }

    /// The raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for KeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
