//! Text adapters around the solver: instance reader and report writer.
//!
//! - [`parse_instance`] / [`read_instance`] — Keyword instance format
//! - [`Report`] — Plain-text summary of a [`SolveOutcome`](crate::solver::SolveOutcome)

mod parser;
mod report;

pub use parser::parse_instance;
pub use report::Report;

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Instance;

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}
