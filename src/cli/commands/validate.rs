//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the redactor configuration file.

use crate::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration file: {shown}");
        println!();

        // Loading applies overrides and validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        if config_path.is_none() && !Path::new(DEFAULT_CONFIG_PATH).exists() {
            println!("ℹ️  No configuration file found, using built-in defaults");
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Output Path: {}", config.scan.output_path.display());
        println!("  PII Only: {}", config.scan.pii_only);
        println!(
            "  Combination Threshold: {}",
            config.scan.combination_threshold
        );
        if config.audit.enabled {
            println!("  Audit Log: {}", config.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(ValidateArgs {}.execute(Some(&path)).unwrap(), 2);
    }

    #[test]
    fn test_validate_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[logging]\nlocal_rotation = \"weekly\"\n").unwrap();
        assert_eq!(ValidateArgs {}.execute(Some(&path)).unwrap(), 2);
    }
}
