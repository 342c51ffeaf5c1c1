// PII Redactor - PII detection and masking for tabular JSON records
// Copyright (c) 2025 PII Redactor Contributors
// Licensed under the MIT License

use pii_redactor::cli::{Cli, Commands};
use pii_redactor::config::{load_config_or_default, LoggingConfig};
use pii_redactor::log_error_with_context;
use pii_redactor::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the configuration when it loads; commands
    // report configuration errors themselves.
    let config = load_config_or_default(cli.config.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "PII Redactor - PII detection and masking"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Scan(args) => args.execute(config_path),
        Commands::ValidateConfig(args) => args.execute(config_path),
        Commands::Init(args) => args.execute(),
    }
}
