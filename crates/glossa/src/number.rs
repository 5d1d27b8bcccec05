//! Locale-aware number formatting.
//!
//! Delimiters and the grouping scheme come from translations under
//! `number.format.*`; a missing translation falls back to the conventional
//! `,` / `.` western defaults. The fallback rides the default-value chain
//! (so a default-locale miss resolves it before create-on-miss echoes the
//! key text back) with [`Engine::translate_or`] as the outer guard for
//! locales where even the text default misses.

use crate::engine::{DefaultArg, DefaultValue, Engine, Options};
use crate::error::TranslateError;

fn format_setting(
    engine: &Engine,
    locale: &str,
    key: &str,
    fallback: &'static str,
) -> Result<String, TranslateError> {
    let options = Options::builder()
        .default(DefaultArg::One(DefaultValue::Text(fallback.to_string())))
        .build();
    let entry = engine.translate_or(locale, key, options, fallback)?;
    Ok(entry.as_text().unwrap_or(fallback).to_string())
}

/// Digit-grouping scheme for integer parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingScheme {
    /// Groups of three: `1,234,567`.
    #[default]
    Western,
    /// Rightmost group of three, then groups of two: `12,34,567`.
    Indian,
}

/// The locale's delimiter and grouping scheme.
fn grouping(engine: &Engine, locale: &str) -> Result<(String, GroupingScheme), TranslateError> {
    let delimiter = format_setting(engine, locale, "number.format.delimiter", ",")?;
    let scheme = format_setting(engine, locale, "number.format.grouping_scheme", "western")?;
    let scheme = match scheme.as_str() {
        "indian" => GroupingScheme::Indian,
        _ => GroupingScheme::Western,
    };
    Ok((delimiter, scheme))
}

/// Format an integer with the locale's delimiter and grouping scheme.
///
/// Sourced from `number.format.delimiter` (default `,`) and
/// `number.format.grouping_scheme` (default western).
pub fn localize_integer(
    engine: &Engine,
    locale: &str,
    n: i64,
) -> Result<String, TranslateError> {
    let (delimiter, scheme) = grouping(engine, locale)?;
    let sign = if n < 0 { "-" } else { "" };
    let digits = n.unsigned_abs().to_string();
    Ok(format!("{sign}{}", group_digits(&digits, &delimiter, scheme)))
}

/// Format a float with the locale's delimiter, decimal separator, and
/// grouping scheme.
///
/// Additionally sources `number.format.separator` (default `.`) for the
/// decimal point. The integer digit string is grouped directly, so
/// magnitudes past `i64::MAX` keep their digits.
pub fn localize_float(
    engine: &Engine,
    locale: &str,
    n: f64,
) -> Result<String, TranslateError> {
    let (delimiter, scheme) = grouping(engine, locale)?;
    let separator = format_setting(engine, locale, "number.format.separator", ".")?;

    let formatted = n.abs().to_string();
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (formatted.as_str(), "0"),
    };

    let sign = if n.is_sign_negative() { "-" } else { "" };
    Ok(format!(
        "{sign}{}{separator}{frac_part}",
        group_digits(int_part, &delimiter, scheme)
    ))
}

/// Insert the delimiter into a plain digit string per the grouping scheme.
fn group_digits(digits: &str, delimiter: &str, scheme: GroupingScheme) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(len * 2);
    for (i, c) in chars.iter().enumerate() {
        out.push(*c);
        let remaining = len - i - 1;
        if remaining == 0 {
            continue;
        }
        let grouped = match scheme {
            GroupingScheme::Western => remaining % 3 == 0,
            // Indian grouping: last group of three, then pairs.
            GroupingScheme::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        };
        if grouped {
            out.push_str(delimiter);
        }
    }
    out
}
