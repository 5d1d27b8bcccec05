use bon::Builder;

/// A locale known to the resolution engine.
///
/// Carries the locale code and whether this is the process default locale.
/// Fallback chains live in [`crate::FallbackConfig`], not on the locale
/// itself.
///
/// # Example
///
/// ```
/// use glossa::Locale;
///
/// let locale = Locale::builder().code("de-CH").build();
/// assert_eq!(locale.language(), "de");
/// assert_eq!(locale.country(), Some("CH"));
/// assert!(!locale.is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct Locale {
    /// Locale code, e.g. `de` or `en-US`.
    code: String,

    /// True for the single process-wide default locale.
    #[builder(default = false)]
    default: bool,
}

impl Locale {
    /// The locale code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True if this is the default locale.
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// The language portion of the code: `de-DE` -> `de`, `en` -> `en`.
    pub fn language(&self) -> &str {
        match self.code.split_once('-') {
            Some((language, _)) => language,
            None => &self.code,
        }
    }

    /// The country portion of the code, if present: `de-DE` -> `DE`.
    pub fn country(&self) -> Option<&str> {
        self.code.split_once('-').map(|(_, country)| country)
    }
}
