//! Configuration schema types
//!
//! This module defines the configuration structure for the redactor.

use crate::detection::combinatorial::{Signal, DEFAULT_COMBINATION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main redactor configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedactorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.scan.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Where the output table is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Forward only rows classified as PII
    #[serde(default = "default_true")]
    pub pii_only: bool,

    /// Number of co-occurring signals that marks a record as PII
    #[serde(default = "default_combination_threshold")]
    pub combination_threshold: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            pii_only: true,
            combination_threshold: DEFAULT_COMBINATION_THRESHOLD,
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_path.as_os_str().is_empty() {
            return Err("scan.output_path cannot be empty".to_string());
        }

        let max = Signal::ALL.len();
        if self.combination_threshold == 0 || self.combination_threshold > max {
            return Err(format!(
                "scan.combination_threshold must be between 1 and {max}, got {}",
                self.combination_threshold
            ));
        }

        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append an entry for every flagged record
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Write JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_path() -> PathBuf {
    PathBuf::from("redacted_output.csv")
}

fn default_combination_threshold() -> usize {
    DEFAULT_COMBINATION_THRESHOLD
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redactions.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RedactorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan.combination_threshold, 2);
        assert!(config.scan.pii_only);
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RedactorConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(
            config.scan.output_path,
            PathBuf::from("redacted_output.csv")
        );
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = RedactorConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.application.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        let mut config = RedactorConfig::default();
        config.scan.combination_threshold = 0;
        assert!(config.validate().is_err());

        config.scan.combination_threshold = 5;
        assert!(config.validate().is_err());

        config.scan.combination_threshold = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = RedactorConfig::default();
        config.logging.local_rotation = "size".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("local_rotation"));
    }

    #[test]
    fn test_empty_output_path() {
        let mut config = RedactorConfig::default();
        config.scan.output_path = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
