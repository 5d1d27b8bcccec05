//! Implementation of the `glossa missing` command.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::translations::TranslationsFile;

/// Arguments for the missing command.
#[derive(Debug, clap::Args)]
pub struct MissingArgs {
    /// Translations file (JSON)
    #[arg(long, required = true)]
    pub translations: PathBuf,

    /// Locales to inspect (comma-separated). Defaults to every non-default
    /// locale in the file.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for missing-key data.
#[derive(Debug, Serialize)]
struct MissingJson {
    locale: String,
    missing: Vec<String>,
}

/// Run the missing command.
///
/// A key counts as missing in a locale when its record exists but carries no
/// value (the untranslated marker left by default-locale backfill or by a
/// `null` plural form), or when the default locale has it and the locale has
/// no record at all.
pub fn run_missing(args: MissingArgs) -> miette::Result<i32> {
    let file = TranslationsFile::load(&args.translations)?;
    let store = file.build_store();

    let locales = if args.lang.is_empty() {
        file.locale_codes()
    } else {
        args.lang.clone()
    };

    let default_keys: Vec<String> = store
        .records_for_locale(&file.default_locale)
        .iter()
        .filter(|record| record.value.is_some())
        .map(|record| record.raw_key.clone())
        .collect();

    let mut report: Vec<MissingJson> = Vec::new();
    for locale in &locales {
        let records = store.records_for_locale(locale);
        let untranslated: Vec<&str> = records
            .iter()
            .filter(|record| record.value.is_none())
            .map(|record| record.raw_key.as_str())
            .collect();
        let translated: Vec<&str> = records
            .iter()
            .filter(|record| record.value.is_some())
            .map(|record| record.raw_key.as_str())
            .collect();

        let mut missing: Vec<String> = default_keys
            .iter()
            .filter(|key| !translated.contains(&key.as_str()))
            .cloned()
            .collect();
        for key in untranslated {
            if !missing.iter().any(|seen| seen == key) {
                missing.push(key.to_string());
            }
        }
        missing.sort();
        missing.dedup();

        report.push(MissingJson {
            locale: locale.clone(),
            missing,
        });
    }

    if args.json {
        let json_output = serde_json::to_string_pretty(&report)
            .expect("JSON serialization should not fail");
        println!("{}", json_output);
    } else {
        for entry in &report {
            if entry.missing.is_empty() {
                println!("{}: {}", entry.locale, "complete".green());
                continue;
            }
            println!("{} ({} missing):", entry.locale, entry.missing.len());
            for key in &entry.missing {
                println!("  - {}", key.yellow());
            }
        }
    }

    Ok(exitcode::OK)
}
