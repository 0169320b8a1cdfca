//! PMA Core Library
//!
//! The protein metadata aggregation pipeline: extract accession identifiers
//! out of homology-search reports, look each one up on UniProt, parse the
//! returned record text into feature sets or taxonomy chains, and aggregate
//! per-entity results into an ordered, reportable mapping that tolerates
//! per-item failures.
//!
//! # Example
//!
//! ```no_run
//! use pma_core::aggregate::Aggregator;
//! use pma_core::config::PipelineConfig;
//! use pma_core::extract::{ReportFormat, ReportScan};
//! use pma_core::fetch::UniProtClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::from_env()?;
//!     let client = UniProtClient::new(&config)?;
//!
//!     let scan = ReportScan::from_file("hits.out", ReportFormat::HitBlock)?;
//!     let outcome = Aggregator::new(&client)
//!         .with_cap(config.cap)
//!         .annotate_report(scan.accessions(), None)
//!         .await?;
//!
//!     println!("{} entities resolved", outcome.summary.resolved);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod names;
pub mod parse;
pub mod report;

// Re-export commonly used types
pub use aggregate::{AggregateReport, Aggregator, EntityOutcome, RunOutcome, RunSummary};
pub use config::PipelineConfig;
pub use extract::{ReportFormat, ReportScan};
pub use fetch::{FetchError, UniProtClient};
pub use parse::AnnotationKind;
