//! Core CLI commands for doclinks: check, info.

use std::path::Path;
use std::process::ExitCode;

use crate::error;
use crate::report::{self, Format};
use crate::scanner;

/// Scan the tree containing `start`, print the report, and map it to an exit status.
///
/// # Errors
///
/// Returns errors from root resolution, enumeration, or reading documents.
pub fn check(start: &Path, format: Format) -> Result<ExitCode, error::Error> {
    let summary = scanner::run(start)?;
    tracing::info!(
        scanned = summary.scanned,
        discovered = summary.discovered,
        broken = summary.broken.len(),
        skipped = summary.skipped.len(),
        "Scan finished"
    );
    return Ok(report::print(&summary, format));
}

/// Output a reference document describing what doclinks checks.
pub fn info(start: &Path, json: bool) {
    return crate::info::run(start, json);
}
