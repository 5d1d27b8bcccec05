//! CLI command implementations.

mod coverage;
mod missing;
mod resolve;

pub use coverage::{run_coverage, CoverageArgs};
pub use missing::{run_missing, MissingArgs};
pub use resolve::{run_resolve, ResolveArgs};
