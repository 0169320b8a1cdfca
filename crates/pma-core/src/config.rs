//! Pipeline configuration
//!
//! Every remote endpoint, the organism filter, and the processing cap are
//! explicit here rather than scattered as globals; components take a
//! `PipelineConfig` at construction.

use pma_common::{PmaError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pipeline Configuration Constants
// ============================================================================

/// Default UniProt query endpoint (gene-name search and full-text records).
pub const DEFAULT_UNIPROT_URL: &str = "https://www.uniprot.org/uniprot/";

/// Default EBI Proteins API endpoint for per-accession feature records.
pub const DEFAULT_FEATURES_URL: &str = "https://www.ebi.ac.uk/proteins/api/features";

/// Default organism filter applied to gene-name searches.
pub const DEFAULT_ORGANISM: &str = "Saccharomyces cerevisiae";

/// Default timeout for remote requests in seconds.
/// Can be overridden via the PMA_TIMEOUT_SECS environment variable.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// UniProt query endpoint
    pub uniprot_url: String,

    /// Feature-record endpoint
    pub features_url: String,

    /// Organism filter for gene-name searches
    pub organism: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Stop processing after this many entities (None = no cap)
    pub cap: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            uniprot_url: DEFAULT_UNIPROT_URL.to_string(),
            features_url: DEFAULT_FEATURES_URL.to_string(),
            organism: DEFAULT_ORGANISM.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cap: None,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// - `PMA_UNIPROT_URL`: UniProt query endpoint
    /// - `PMA_FEATURES_URL`: feature-record endpoint
    /// - `PMA_ORGANISM`: organism filter for gene-name searches
    /// - `PMA_TIMEOUT_SECS`: per-request timeout in seconds
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PMA_UNIPROT_URL") {
            config.uniprot_url = url;
        }

        if let Ok(url) = std::env::var("PMA_FEATURES_URL") {
            config.features_url = url;
        }

        if let Ok(organism) = std::env::var("PMA_ORGANISM") {
            config.organism = organism;
        }

        if let Ok(secs) = std::env::var("PMA_TIMEOUT_SECS") {
            config.timeout_secs = secs
                .parse()
                .map_err(|_| PmaError::config(format!("Invalid PMA_TIMEOUT_SECS: {}", secs)))?;
        }

        Ok(config)
    }

    /// Set the processing cap
    pub fn with_cap(mut self, cap: Option<usize>) -> Self {
        self.cap = cap;
        self
    }

    /// Set the organism filter
    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.organism = organism.into();
        self
    }

    /// Set the UniProt endpoint
    pub fn with_uniprot_url(mut self, url: impl Into<String>) -> Self {
        self.uniprot_url = url.into();
        self
    }

    /// Set the feature-record endpoint
    pub fn with_features_url(mut self, url: impl Into<String>) -> Self {
        self.features_url = url.into();
        self
    }
}
