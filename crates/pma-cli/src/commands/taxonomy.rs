//! Taxonomy command implementation
//!
//! Extracts accessions from a homology-search report and profiles the
//! taxonomic lineage of each one.

use crate::error::Result;
use crate::ReportFormatArg;
use pma_core::aggregate::Aggregator;
use pma_core::config::PipelineConfig;
use pma_core::extract::ReportScan;
use pma_core::fetch::UniProtClient;
use pma_core::parse::AnnotationKind;
use std::path::PathBuf;
use tracing::info;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    input: PathBuf,
    format: ReportFormatArg,
    term: Option<String>,
    limit: Option<usize>,
    export: Option<PathBuf>,
    json: bool,
    uniprot_url: String,
) -> Result<()> {
    let config = PipelineConfig::from_env()?
        .with_uniprot_url(uniprot_url)
        .with_cap(limit);

    let scan = ReportScan::from_file(&input, format.into())?;

    info!(
        input = %input.display(),
        format = %scan.format(),
        "Scanning report for accessions"
    );

    let client = UniProtClient::new(&config)?;

    let outcome = Aggregator::new(&client)
        .with_cap(config.cap)
        .annotate_report(scan.accessions(), term.as_deref())
        .await?;

    super::emit(
        &outcome,
        AnnotationKind::Taxonomy,
        term.as_deref(),
        export.as_deref(),
        json,
    )
}
