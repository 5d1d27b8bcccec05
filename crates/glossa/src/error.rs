//! Error types for translation resolution.

use thiserror::Error;

use crate::store::StoreError;

/// An error produced while resolving a translation.
///
/// Only `InvalidLocale`, `AmbiguousDefaultArguments`, and store failures are
/// hard failures. `MissingTranslation` is the engine's answer, not a crash:
/// the backend chain consumes it to try the next backend, and the ultimate
/// caller can render a placeholder such as the raw key.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The requested locale code has no corresponding locale object.
    #[error("invalid locale: '{code}'")]
    InvalidLocale { code: String },

    /// No record, no fallback, and no default resolved.
    #[error("missing translation for key '{key}' in locale '{locale}'")]
    MissingTranslation { locale: String, key: String },

    /// The default option was supplied in an unsupported shape.
    #[error("ambiguous default arguments: empty default candidate list")]
    AmbiguousDefaultArguments,

    /// The store failed. Create-on-miss duplicate races never surface here;
    /// they are recovered by re-reading.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TranslateError {
    /// True for the missing-translation signal, which the backend chain
    /// treats as "try the next backend".
    pub fn is_missing(&self) -> bool {
        matches!(self, TranslateError::MissingTranslation { .. })
    }
}

/// Near-miss suggestions for a key that failed to resolve.
///
/// Returns up to three candidates within a Levenshtein distance of 3,
/// closest first. Used by diagnostics to answer "did you mean?".
///
/// # Example
///
/// ```
/// use glossa::compute_suggestions;
///
/// let candidates = ["greeting".to_string(), "menu.file".to_string()];
/// assert_eq!(compute_suggestions("greetng", &candidates), ["greeting"]);
/// ```
pub fn compute_suggestions(key: &str, candidates: &[String]) -> Vec<String> {
    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
