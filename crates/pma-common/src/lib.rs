//! PMA Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling, and logging for the PMA workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all PMA workspace members:
//!
//! - **Error Handling**: the [`PmaError`] type and [`Result`] alias
//! - **Logging**: tracing initialization ([`logging`])
//! - **Types**: domain types shared by the pipeline and the CLI ([`types`])

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{PmaError, Result};
pub use types::{AccessionId, Annotation, FeatureSet, TaxonomyChain};
