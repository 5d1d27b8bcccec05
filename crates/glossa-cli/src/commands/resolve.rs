//! Implementation of the `glossa resolve` command.

use std::collections::HashMap;
use std::path::PathBuf;

use glossa::{DefaultArg, DefaultValue, Options, TranslateError, TranslationRecord, Value};

use crate::output::MissingKeyDiagnostic;
use crate::translations::TranslationsFile;

/// Arguments for the resolve command.
#[derive(Debug, clap::Args)]
pub struct ResolveArgs {
    /// Translations file (JSON)
    #[arg(long, required = true)]
    pub translations: PathBuf,

    /// Locale code to resolve in (e.g., en, de, ru)
    #[arg(long, required = true)]
    pub locale: String,

    /// Key to resolve
    pub key: String,

    /// Pluralization count
    #[arg(long)]
    pub count: Option<i64>,

    /// Literal fallback used when nothing resolves
    #[arg(long)]
    pub default: Option<String>,

    /// Bindings in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the resolve command.
pub fn run_resolve(args: ResolveArgs) -> miette::Result<i32> {
    let file = TranslationsFile::load(&args.translations)?;
    let store = file.build_store();
    let engine = file.engine();

    // Numeric-looking parameters bind as numbers so they can drive plural
    // selection and digit formatting.
    let bindings: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| {
            let value = if let Ok(n) = v.parse::<i64>() {
                Value::from(n)
            } else if let Ok(f) = v.parse::<f64>() {
                Value::from(f)
            } else {
                Value::from(v)
            };
            (k, value)
        })
        .collect();

    let options = Options::builder()
        .bindings(bindings)
        .maybe_count(args.count)
        .maybe_default(
            args.default
                .map(|text| DefaultArg::One(DefaultValue::Text(text))),
        )
        .build();

    match engine.translate(&args.locale, args.key.as_str(), options) {
        Ok(entry) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&entry)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", entry);
            }
            Ok(exitcode::OK)
        }
        Err(TranslateError::MissingTranslation { locale, key }) => {
            if args.json {
                let output = serde_json::json!({
                    "error": format!("missing translation for key '{key}' in locale '{locale}'")
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                let known: Vec<String> = store
                    .records_for_locale(&file.default_locale)
                    .iter()
                    .map(|record: &TranslationRecord| record.raw_key.clone())
                    .collect();
                let diagnostic = MissingKeyDiagnostic::new(&locale, &key, &known);
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            Ok(exitcode::DATAERR)
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
