//! Glossa CLI entry point.
//!
//! Provides command-line tools for working with glossa translation files:
//! - `glossa resolve` - Resolve a key against a translations file
//! - `glossa missing` - List untranslated keys per locale
//! - `glossa coverage` - Report translation coverage across locales

mod commands;
mod output;
mod translations;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_coverage, run_missing, run_resolve, CoverageArgs, MissingArgs, ResolveArgs};

/// Glossa translation file tools.
#[derive(Debug, Parser)]
#[command(name = "glossa")]
#[command(about = "Glossa translation file tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output (resolution tracing on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a key for a locale
    Resolve(ResolveArgs),
    /// List untranslated keys per locale
    Missing(MissingArgs),
    /// Report translation coverage across locales
    Coverage(CoverageArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Route resolution tracing to stderr when `--verbose` is set.
fn setup_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("glossa=debug"))
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Resolve(args) => run_resolve(args),
        Commands::Missing(args) => run_missing(args),
        Commands::Coverage(args) => run_coverage(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
