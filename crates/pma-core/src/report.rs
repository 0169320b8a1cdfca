//! Result rendering and export
//!
//! One line (or row) per entity, in processing order. Unresolved entities
//! are never dropped; they carry the explicit [`UNRESOLVED_MARKER`] so a
//! failed lookup is distinguishable from a genuinely empty annotation.

use crate::aggregate::{AggregateReport, EntityOutcome, RunOutcome};
use crate::parse::AnnotationKind;
use pma_common::{PmaError, Result};
use std::io::Write;
use std::path::Path;

/// Rendered stand-in for an entity whose lookup failed.
pub const UNRESOLVED_MARKER: &str = "unresolved";

fn render_outcome(outcome: &EntityOutcome) -> String {
    match outcome {
        EntityOutcome::Annotated(annotation) => annotation.render(),
        EntityOutcome::Unresolved => UNRESOLVED_MARKER.to_string(),
    }
}

/// Write one `key: annotation` line per entity.
pub fn write_console<W: Write>(out: &mut W, report: &AggregateReport) -> Result<()> {
    for record in report.iter() {
        writeln!(out, "{}: {}", record.key, render_outcome(&record.outcome))?;
    }
    Ok(())
}

/// Render the whole run (report plus summary) as pretty JSON.
pub fn render_json(outcome: &RunOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Export the report as CSV: entity key plus one rendered annotation
/// column named after the annotation kind.
pub fn export_csv(report: &AggregateReport, path: impl AsRef<Path>, kind: AnnotationKind) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path.as_ref()).map_err(|e| PmaError::export(e.to_string()))?;

    writer
        .write_record(["Entity", kind.column_name()])
        .map_err(|e| PmaError::export(e.to_string()))?;

    for record in report.iter() {
        writer
            .write_record([record.key.as_str(), &render_outcome(&record.outcome)])
            .map_err(|e| PmaError::export(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
