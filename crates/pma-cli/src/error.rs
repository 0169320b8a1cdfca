//! Error types for the PMA CLI

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Pipeline-level failure (malformed report, export, config)
    #[error(transparent)]
    Pipeline(#[from] pma_common::PmaError),

    /// The HTTP client could not be constructed
    #[error("Network client error: {0}. Check the endpoint URLs and your connection.")]
    Fetch(#[from] pma_core::FetchError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check the path and its permissions.")]
    Io(#[from] std::io::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
