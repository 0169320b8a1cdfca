//! PMA CLI - Main entry point

use clap::Parser;
use pma_cli::{Cli, Commands};
use pma_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .log_file_prefix("pma".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .log_file_prefix("pma".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = log_config.with_env_overrides().unwrap_or_default();

    // Initialize logging (ignore errors as the CLI should work without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> pma_cli::Result<()> {
    match cli.command {
        Commands::Features {
            gene,
            feature,
            count,
            organism,
            limit,
            export,
            json,
        } => {
            pma_cli::commands::features::run(
                gene,
                feature,
                count,
                organism,
                limit,
                export,
                json,
                cli.uniprot_url,
                cli.features_url,
            )
            .await
        }

        Commands::Taxonomy {
            input,
            format,
            term,
            limit,
            export,
            json,
        } => {
            pma_cli::commands::taxonomy::run(
                input,
                format,
                term,
                limit,
                export,
                json,
                cli.uniprot_url,
            )
            .await
        }
    }
}
