//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PII Redactor - detect and mask personal data in tabular JSON records
#[derive(Parser, Debug)]
#[command(name = "pii-redactor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to pii-redactor.toml when present)
    #[arg(short, long, env = "PII_REDACTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_REDACTOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify and redact the rows of an input table
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
