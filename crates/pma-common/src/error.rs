//! Error types for PMA

use thiserror::Error;

/// Result type alias for PMA operations
pub type Result<T> = std::result::Result<T, PmaError>;

/// Main error type for PMA
///
/// Recoverable per-item conditions (a failed lookup for a single accession)
/// are not represented here; those live with the fetch layer and are
/// absorbed into per-entity results. `PmaError` is for conditions that end
/// the run.
#[derive(Error, Debug)]
pub enum PmaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A report line passed the row/prefix check but its accession could
    /// not be extracted. The input does not conform to the report schema.
    #[error("malformed report at line {line}: no accession in {text:?}. The file does not match the selected report format.")]
    MalformedReport { line: usize, text: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}. Check the output path and its permissions.")]
    Export(String),
}

impl PmaError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an export error
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Create a malformed-report error
    pub fn malformed_report(line: usize, text: impl Into<String>) -> Self {
        Self::MalformedReport {
            line,
            text: text.into(),
        }
    }
}
