//! PMA CLI Library
//!
//! Command-line interface for the protein metadata aggregation pipeline:
//!
//! - **Feature profiling**: expand a base gene name into a numbered
//!   candidate series and collect the unique UniProt features of each
//!   candidate (`pma features --gene Atg`)
//! - **Taxonomy profiling**: extract accessions from a homology-search
//!   report and collect each one's taxonomic lineage
//!   (`pma taxonomy --input hits.out`)

pub mod commands;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use pma_core::config::{DEFAULT_FEATURES_URL, DEFAULT_UNIPROT_URL, DEFAULT_ORGANISM};
use pma_core::extract::ReportFormat;
use pma_core::names::DEFAULT_CANDIDATE_COUNT;
use std::path::PathBuf;

/// PMA - Protein Metadata Aggregator
#[derive(Parser, Debug)]
#[command(name = "pma")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// UniProt query endpoint
    #[arg(long, env = "PMA_UNIPROT_URL", default_value = DEFAULT_UNIPROT_URL, global = true)]
    pub uniprot_url: String,

    /// Feature-record endpoint
    #[arg(long, env = "PMA_FEATURES_URL", default_value = DEFAULT_FEATURES_URL, global = true)]
    pub features_url: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile feature annotations across a numbered gene-name series
    Features {
        /// Base gene name, expanded with numeric suffixes (e.g. "Atg" -> Atg1..)
        #[arg(short, long)]
        gene: String,

        /// Feature term to count membership for
        #[arg(short, long)]
        feature: Option<String>,

        /// Number of suffixed candidates to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_CANDIDATE_COUNT)]
        count: u32,

        /// Organism filter for the gene search
        #[arg(long, env = "PMA_ORGANISM", default_value = DEFAULT_ORGANISM)]
        organism: String,

        /// Stop after this many candidates
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write the report as CSV to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print the run as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Profile taxonomic lineages for the accessions in a search report
    Taxonomy {
        /// Path to the homology-search report file
        #[arg(short, long)]
        input: PathBuf,

        /// Report layout
        #[arg(short = 'f', long, value_enum, default_value = "hit-block")]
        format: ReportFormatArg,

        /// Lineage level to count membership for
        #[arg(short, long)]
        term: Option<String>,

        /// Stop after this many accessions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write the report as CSV to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print the run as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Report layout argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Numbered summary rows with db|accession|name tokens
    SummaryTable,
    /// "No Hit" banner followed by UniRef100_<acc> lines
    HitBlock,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::SummaryTable => ReportFormat::SummaryTable,
            ReportFormatArg::HitBlock => ReportFormat::HitBlock,
        }
    }
}
