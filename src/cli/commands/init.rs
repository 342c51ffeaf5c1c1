//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Sample configuration written by `init`
pub const CONFIG_TEMPLATE: &str = r#"# PII Redactor Configuration File

[application]
log_level = "info"  # trace | debug | info | warn | error

[scan]
output_path = "redacted_output.csv"
pii_only = true              # write only rows classified as PII
combination_threshold = 2    # signals (name, email, address, device/ip) needed to flag a record

[audit]
enabled = false
log_path = "./audit/redactions.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"     # daily | hourly
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        println!("📝 Initializing PII redactor configuration");
        println!();

        if self.output.exists() && !self.force {
            println!(
                "❌ Configuration file already exists: {}",
                self.output.display()
            );
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, CONFIG_TEMPLATE) {
            Ok(_) => {
                println!(
                    "✅ Configuration file created: {}",
                    self.output.display()
                );
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output.display());
                println!("  2. Validate configuration: pii-redactor validate-config");
                println!("  3. Run a scan: pii-redactor scan input.csv");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
