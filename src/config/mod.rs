//! Configuration management for the redactor.
//!
//! # Overview
//!
//! Configuration lives in a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `PII_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii_redactor::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii-redactor.toml")?;
//!
//! println!("Output: {}", config.scan.output_path.display());
//! println!("Threshold: {}", config.scan.combination_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ScanConfig`] - Output path, forwarding policy, combination threshold
//! - [`AuditConfig`] - Audit trail of flagged records
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [scan]
//! output_path = "redacted_output.csv"
//! pii_only = true
//! combination_threshold = 2
//!
//! [audit]
//! enabled = true
//! log_path = "${AUDIT_DIR}/redactions.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, AuditConfig, LoggingConfig, RedactorConfig, ScanConfig};
