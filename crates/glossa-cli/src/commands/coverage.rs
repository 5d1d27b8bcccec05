//! Coverage command implementation.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use miette::Result;
use serde::Serialize;

use crate::output::table::{format_coverage_table, LocaleCoverage};
use crate::translations::TranslationsFile;

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Translations file (JSON)
    #[arg(long, required = true)]
    pub translations: PathBuf,

    /// Locales to check coverage for (comma-separated). Defaults to every
    /// non-default locale in the file.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let file = TranslationsFile::load(&args.translations)?;
    let store = file.build_store();

    // The default locale's translated keys are the reference set.
    let source_keys: HashSet<String> = store
        .records_for_locale(&file.default_locale)
        .iter()
        .filter(|record| record.value.is_some())
        .map(|record| record.raw_key.clone())
        .collect();
    let source_count = source_keys.len();

    let locales = if args.lang.is_empty() {
        file.locale_codes()
    } else {
        args.lang.clone()
    };

    let mut coverage_data: Vec<LocaleCoverage> = Vec::new();
    for locale in &locales {
        let translated_keys: HashSet<String> = store
            .records_for_locale(locale)
            .iter()
            .filter(|record| record.value.is_some())
            .map(|record| record.raw_key.clone())
            .collect();

        let mut missing: Vec<String> = source_keys
            .iter()
            .filter(|key| !translated_keys.contains(*key))
            .cloned()
            .collect();
        missing.sort();

        let translated = source_keys.intersection(&translated_keys).count();

        coverage_data.push(LocaleCoverage {
            locale: locale.clone(),
            translated,
            missing,
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data)
            .expect("JSON serialization should not fail");
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                println!("\nMissing in {}:", locale_coverage.locale);
                for key in &locale_coverage.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
