//! Features command implementation
//!
//! Expands a base gene name into a numbered candidate series and profiles
//! the unique UniProt features of every candidate.

use crate::error::Result;
use pma_core::aggregate::Aggregator;
use pma_core::config::PipelineConfig;
use pma_core::fetch::UniProtClient;
use pma_core::names::NameSeries;
use pma_core::parse::AnnotationKind;
use std::path::PathBuf;
use tracing::info;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    gene: String,
    feature: Option<String>,
    count: u32,
    organism: String,
    limit: Option<usize>,
    export: Option<PathBuf>,
    json: bool,
    uniprot_url: String,
    features_url: String,
) -> Result<()> {
    let config = PipelineConfig::from_env()?
        .with_uniprot_url(uniprot_url)
        .with_features_url(features_url)
        .with_organism(organism)
        .with_cap(limit);

    let client = UniProtClient::new(&config)?;
    let series = NameSeries::new(&gene, count);

    info!(
        gene = %gene,
        candidates = series.len(),
        organism = %config.organism,
        "Profiling gene-name series"
    );

    let outcome = Aggregator::new(&client)
        .with_cap(config.cap)
        .annotate_genes(series.iter(), feature.as_deref())
        .await?;

    super::emit(
        &outcome,
        AnnotationKind::Features,
        feature.as_deref(),
        export.as_deref(),
        json,
    )
}
