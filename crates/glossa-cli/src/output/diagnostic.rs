//! Miette diagnostic for missing translations.

use glossa::compute_suggestions;
use miette::Diagnostic;
use thiserror::Error;

/// A miette-compatible diagnostic for a key that failed to resolve.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("missing translation for key '{key}' in locale '{locale}'")]
#[diagnostic(code(glossa::missing))]
pub struct MissingKeyDiagnostic {
    key: String,

    locale: String,

    #[help]
    help: Option<String>,
}

impl MissingKeyDiagnostic {
    /// Create a diagnostic with near-miss suggestions drawn from the known
    /// keys of the default locale.
    pub fn new(locale: &str, key: &str, known_keys: &[String]) -> Self {
        let suggestions = compute_suggestions(key, known_keys);
        let help = if suggestions.is_empty() {
            None
        } else {
            Some(format!("did you mean: {}?", suggestions.join(", ")))
        };
        MissingKeyDiagnostic {
            key: key.to_string(),
            locale: locale.to_string(),
            help,
        }
    }
}
