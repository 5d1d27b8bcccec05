//! Locale lookup interface and an in-memory provider.

use crate::types::Locale;

/// Host-side locale object model: lookup by code, default locale, and the
/// available-locales listing.
pub trait LocaleProvider: Send + Sync {
    /// The locale for a code, or `None` if unknown.
    fn find_by_code(&self, code: &str) -> Option<Locale>;

    /// The single process-wide default locale.
    fn default_locale(&self) -> Locale;

    /// All known locale codes, default locale included.
    fn available_locales(&self) -> Vec<String>;
}

/// An in-memory [`LocaleProvider`] over a fixed locale list.
///
/// # Example
///
/// ```
/// use glossa::{LocaleProvider, MemoryLocales};
///
/// let locales = MemoryLocales::new("en", ["de", "fr"]);
/// assert!(locales.find_by_code("de").is_some());
/// assert!(locales.default_locale().is_default());
/// assert_eq!(locales.available_locales(), ["en", "de", "fr"]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLocales {
    locales: Vec<Locale>,
}

impl MemoryLocales {
    /// Build a provider from a default locale code and the other available
    /// codes.
    pub fn new(
        default_locale: impl Into<String>,
        others: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut locales = vec![
            Locale::builder()
                .code(default_locale.into())
                .default(true)
                .build(),
        ];
        for code in others {
            locales.push(Locale::builder().code(code.into()).build());
        }
        Self { locales }
    }
}

impl LocaleProvider for MemoryLocales {
    fn find_by_code(&self, code: &str) -> Option<Locale> {
        self.locales.iter().find(|l| l.code() == code).cloned()
    }

    fn default_locale(&self) -> Locale {
        self.locales
            .iter()
            .find(|l| l.is_default())
            .cloned()
            .unwrap_or_else(|| Locale::builder().code("en").default(true).build())
    }

    fn available_locales(&self) -> Vec<String> {
        self.locales.iter().map(|l| l.code().to_string()).collect()
    }
}
