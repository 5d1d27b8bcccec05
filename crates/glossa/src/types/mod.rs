//! Core data types for translation resolution.

mod entry;
mod key;
mod locale;
mod record;
mod value;

pub use entry::Entry;
pub use key::{Key, KeyHash};
pub use locale::Locale;
pub use record::{PLURAL_INDEX, SINGULAR_INDEX, TranslationRecord};
pub use value::Value;
