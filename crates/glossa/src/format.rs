//! Placeholder interpolation and pluralization-index selection.
//!
//! The engine treats formatting as a pluggable collaborator behind the
//! [`Formatter`] trait. [`DefaultFormatter`] accepts the four placeholder
//! styles of the legacy formatter (`%{name}`, `{{name}}`, `${name}`,
//! `{name}`) and substitutes bound values; placeholders without a binding
//! are left verbatim.

use std::collections::HashMap;

use winnow::combinator::{alt, delimited, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::Value;

/// Interpolation and plural-index selection as required by the resolution
/// engine.
pub trait Formatter: Send + Sync {
    /// Substitute bound values into `text`. Unbound placeholders stay
    /// verbatim; the result is never partially substituted within a single
    /// placeholder.
    fn interpolate(&self, text: &str, bindings: &HashMap<String, Value>) -> String;

    /// The pluralization index selected by `count`: singular when absent or
    /// exactly 1, else the plural/zero form.
    fn plural_index(&self, count: Option<i64>) -> u8 {
        match count {
            None | Some(1) => 1,
            Some(_) => 0,
        }
    }
}

/// The built-in [`Formatter`].
///
/// Two-form pluralization only (singular = 1, everything else = 0); this
/// does not generalize to languages with more than two plural forms, a
/// known limitation of the record format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn interpolate(&self, text: &str, bindings: &HashMap<String, Value>) -> String {
        let segments = parse_segments(text);
        let mut out = String::with_capacity(text.len());
        for segment in segments {
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Placeholder { raw, name } => match bindings.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }
}

/// A parsed piece of a template string.
enum Segment<'t> {
    Literal(&'t str),
    Placeholder { raw: &'t str, name: &'t str },
}

/// Split a template into literal and placeholder segments.
///
/// Parsing cannot fail: anything that is not a well-formed placeholder is
/// consumed as literal text.
fn parse_segments(input: &str) -> Vec<Segment<'_>> {
    let mut remaining = input;
    let result: ModalResult<Vec<Segment<'_>>> = repeat(0.., segment).parse_next(&mut remaining);
    match result {
        Ok(segments) if remaining.is_empty() => segments,
        // Unreachable with the literal-char fallback, but degrade safely.
        _ => vec![Segment::Literal(input)],
    }
}

fn segment<'t>(input: &mut &'t str) -> ModalResult<Segment<'t>> {
    alt((placeholder, literal_run, literal_char)).parse_next(input)
}

/// One placeholder in any of the four accepted styles.
fn placeholder<'t>(input: &mut &'t str) -> ModalResult<Segment<'t>> {
    alt((
        style(("%", "{"), "}"),
        style(("$", "{"), "}"),
        style(("{", "{"), "}}"),
        bare_braces,
    ))
    .parse_next(input)
}

/// Parser for `<prefix>{name}<close>`-shaped placeholders.
fn style<'t>(
    prefix: (&'static str, &'static str),
    close: &'static str,
) -> impl Parser<&'t str, Segment<'t>, ErrMode<ContextError>> {
    move |input: &mut &'t str| {
        delimited((prefix.0, prefix.1), identifier, close)
            .with_taken()
            .map(|(name, raw)| Segment::Placeholder { raw, name })
            .parse_next(input)
    }
}

/// A bare `{name}` placeholder.
fn bare_braces<'t>(input: &mut &'t str) -> ModalResult<Segment<'t>> {
    delimited("{", identifier, "}")
        .with_taken()
        .map(|(name, raw)| Segment::Placeholder { raw, name })
        .parse_next(input)
}

/// A run of characters that cannot open a placeholder.
fn literal_run<'t>(input: &mut &'t str) -> ModalResult<Segment<'t>> {
    take_while(1.., |c: char| !matches!(c, '{' | '%' | '$'))
        .map(Segment::Literal)
        .parse_next(input)
}

/// A single character consumed literally; catches `{`, `%` and `$` that do
/// not start a placeholder.
fn literal_char<'t>(input: &mut &'t str) -> ModalResult<Segment<'t>> {
    any.take().map(Segment::Literal).parse_next(input)
}

/// Placeholder name: alphanumeric and underscores.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}
