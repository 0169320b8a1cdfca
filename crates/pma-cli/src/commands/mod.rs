//! CLI command implementations

pub mod features;
pub mod taxonomy;

use crate::error::Result;
use colored::Colorize;
use pma_core::aggregate::RunOutcome;
use pma_core::parse::AnnotationKind;
use pma_core::report;
use std::io;
use std::path::Path;
use tracing::info;

/// Render a finished run: entity lines plus summary to the console (or
/// the whole run as JSON), and optionally a CSV export.
pub(crate) fn emit(
    outcome: &RunOutcome,
    kind: AnnotationKind,
    query_term: Option<&str>,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", report::render_json(outcome)?);
    } else {
        let stdout = io::stdout();
        report::write_console(&mut stdout.lock(), &outcome.report)?;

        let summary = &outcome.summary;
        println!();
        println!("{}", "Summary".bold());
        println!("  processed: {}", summary.processed);
        println!("  resolved:  {}", summary.resolved);
        if let (Some(term), Some(matched)) = (query_term, summary.matched) {
            println!("  matching '{}': {}", term.cyan(), matched);
        }
    }

    if let Some(path) = export {
        report::export_csv(&outcome.report, path, kind)?;
        info!(path = %path.display(), "Report exported");
    }

    Ok(())
}
