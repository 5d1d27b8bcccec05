//! Key escaping and normalization.
//!
//! Hierarchical lookup keys are split on a scope separator (normally `.`),
//! but many real-world keys are full human sentences containing periods.
//! Escaping wraps such a key in double quotes so it is treated as one opaque
//! segment regardless of embedded separators:
//!
//! ```text
//! escape("Foo. And Bar.", Some("foo")) -> foo."Foo. And Bar."
//! unescape(r#"foo."Foo. And Bar.""#)   -> (Some("foo"), "Foo. And Bar.")
//! ```

/// The default scope separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Escape a key, optionally under a scope.
///
/// With a scope, produces `<scope><separator>"<key>"`; without, `"<key>"`.
///
/// Known limitation, kept deliberately: the literal is quoted but embedded
/// quote and separator characters inside it are not themselves escaped. A
/// literal containing a `<separator>"` sequence can therefore be mis-split
/// by [`unescape`], whose match is greedy and anchored at the key's end.
/// Downstream data may depend on this, so it is documented rather than
/// changed.
///
/// # Example
///
/// ```
/// use glossa::codec::{escape, DEFAULT_SEPARATOR};
///
/// assert_eq!(
///     escape("Foo. And Bar.", Some("foo"), DEFAULT_SEPARATOR),
///     r#"foo."Foo. And Bar.""#
/// );
/// assert_eq!(escape("Foo. And Bar.", None, DEFAULT_SEPARATOR), r#""Foo. And Bar.""#);
/// ```
pub fn escape(key: &str, scope: Option<&str>, separator: &str) -> String {
    match scope {
        Some(scope) => format!("{scope}{separator}\"{key}\""),
        None => format!("\"{key}\""),
    }
}

/// Split an escaped key into `(scope, literal)`.
///
/// Matches, anchored at the key's end:
///
/// - `<scope><separator>"<literal>"` -> `(Some(scope), literal)`
/// - `"<literal>"` -> `(None, literal)`
/// - anything else -> `(None, key)` unchanged (the key was never escaped)
///
/// The scope match is greedy: the scope extends to the *last*
/// `<separator>"` occurrence that still leaves a closing quote, matching
/// the source regex `((.*)\."(.*)"$)|(^"(.*)"$)`.
///
/// # Example
///
/// ```
/// use glossa::codec::{unescape, DEFAULT_SEPARATOR};
///
/// assert_eq!(
///     unescape(r#"foo."Foo. And Bar.""#, DEFAULT_SEPARATOR),
///     (Some("foo"), "Foo. And Bar.")
/// );
/// assert_eq!(unescape(r#""Foo. And Bar.""#, DEFAULT_SEPARATOR), (None, "Foo. And Bar."));
/// assert_eq!(unescape("foo.bar", DEFAULT_SEPARATOR), (None, "foo.bar"));
/// ```
pub fn unescape<'k>(key: &'k str, separator: &str) -> (Option<&'k str>, &'k str) {
    if key.len() < 2 || !key.ends_with('"') {
        return (None, key);
    }

    // Scoped form: greedy scope up to the last `<separator>"` that leaves
    // the closing quote intact.
    let body = &key[..key.len() - 1];
    let open = format!("{separator}\"");
    if let Some(at) = body.rfind(&open) {
        let scope = &key[..at];
        let literal = &key[at + open.len()..key.len() - 1];
        return (Some(scope), literal);
    }

    // Bare quoted form.
    if key.starts_with('"') {
        return (None, &key[1..key.len() - 1]);
    }

    (None, key)
}

/// The literal portion of an escaped key, or the key unchanged.
///
/// ```
/// use glossa::codec::{unescape_without_scope, DEFAULT_SEPARATOR};
///
/// assert_eq!(
///     unescape_without_scope(r#"foo."Foo. And Bar.""#, DEFAULT_SEPARATOR),
///     "Foo. And Bar."
/// );
/// assert_eq!(unescape_without_scope("plain", DEFAULT_SEPARATOR), "plain");
/// ```
pub fn unescape_without_scope<'k>(key: &'k str, separator: &str) -> &'k str {
    unescape(key, separator).1
}

/// True iff the key matches one of the escaped forms.
pub fn is_escaped(key: &str, separator: &str) -> bool {
    if key.len() < 2 || !key.ends_with('"') {
        return false;
    }
    let body = &key[..key.len() - 1];
    body.contains(&format!("{separator}\"")) || key.starts_with('"')
}

/// Build the full lookup path for a hierarchical store.
///
/// Concatenates `locale`, the scope segments, and `key`, then expands each
/// segment: an escaped segment becomes exactly two path segments
/// `(scope, literal)` with the literal kept opaque, while an unescaped
/// segment is split on the separator. Empty segments are dropped.
///
/// # Example
///
/// ```
/// use glossa::codec::{normalize_keys, DEFAULT_SEPARATOR};
///
/// let path = normalize_keys("en", "menu.file.new", &[], DEFAULT_SEPARATOR);
/// assert_eq!(path, ["en", "menu", "file", "new"]);
///
/// // An escaped key bypasses separator splitting entirely.
/// let path = normalize_keys("en", r#"foo."Item. Count.""#, &[], DEFAULT_SEPARATOR);
/// assert_eq!(path, ["en", "foo", "Item. Count."]);
/// ```
pub fn normalize_keys(
    locale: &str,
    key: &str,
    scope: &[String],
    separator: &str,
) -> Vec<String> {
    let mut segments: Vec<&str> = Vec::with_capacity(scope.len() + 2);
    segments.push(locale);
    segments.extend(scope.iter().map(String::as_str));
    segments.push(key);

    let mut path = Vec::new();
    for segment in segments {
        if is_escaped(segment, separator) {
            let (scope_part, literal) = unescape(segment, separator);
            if let Some(scope_part) = scope_part
                && !scope_part.is_empty()
            {
                path.push(scope_part.to_string());
            }
            if !literal.is_empty() {
                path.push(literal.to_string());
            }
        } else {
            for part in segment.split(separator) {
                if !part.is_empty() {
                    path.push(part.to_string());
                }
            }
        }
    }
    path
}
