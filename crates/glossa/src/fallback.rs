//! Locale fallback chains.

use std::collections::HashMap;

use bon::Builder;

/// The synthetic root locale. It may appear in configured chains but never
/// participates in lookups.
pub const ROOT_LOCALE: &str = "root";

/// Process-wide fallback configuration, keyed by locale code.
///
/// The configuration is immutable once built; [`FallbackConfig::fallback_chain`]
/// is side-effect-free and idempotent. Order within a chain is significant:
/// earlier entries take priority.
///
/// # Example
///
/// ```
/// use glossa::FallbackConfig;
///
/// let fallbacks = FallbackConfig::builder().build()
///     .with_chain("de-CH", ["de", "en"]);
///
/// assert_eq!(fallbacks.fallback_chain("de-CH"), ["de-CH", "de", "en"]);
/// assert_eq!(fallbacks.fallback_chain("fr"), ["fr"]);
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct FallbackConfig {
    /// Configured fallback chains per locale code.
    #[builder(default)]
    chains: HashMap<String, Vec<String>>,
}

impl FallbackConfig {
    /// Create an empty configuration: every chain is just the requested
    /// locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the fallback chain for a locale.
    pub fn with_chain(
        mut self,
        locale: impl Into<String>,
        chain: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.chains
            .insert(locale.into(), chain.into_iter().map(Into::into).collect());
        self
    }

    /// True if any chain is configured for this locale.
    pub fn has_chain(&self, locale: &str) -> bool {
        self.chains.contains_key(locale)
    }

    /// The ordered candidate locales for a request: the requested locale
    /// first, then its configured fallbacks. The `root` locale and
    /// duplicates are filtered out.
    pub fn fallback_chain(&self, locale: &str) -> Vec<String> {
        let mut chain = vec![locale.to_string()];
        if let Some(configured) = self.chains.get(locale) {
            for candidate in configured {
                if candidate != ROOT_LOCALE && !chain.iter().any(|seen| seen == candidate) {
                    chain.push(candidate.clone());
                }
            }
        }
        chain
    }
}
