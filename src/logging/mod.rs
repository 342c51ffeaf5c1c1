//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output on stderr
//! - Optional JSON file output with daily or hourly rotation
//! - Level from configuration, overridable with `RUST_LOG`
//!
//! Field values that may carry PII are never logged, only field names and
//! categories.
//!
//! # Example
//!
//! ```no_run
//! use pii_redactor::logging::init_logging;
//! use pii_redactor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a scan
///
/// # Example
///
/// ```no_run
/// use pii_redactor::log_scan_start;
/// use std::path::Path;
///
/// log_scan_start!(Path::new("input.csv").display(), Path::new("out.csv").display());
/// ```
#[macro_export]
macro_rules! log_scan_start {
    ($input:expr, $output:expr) => {
        tracing::info!(
            input = %$input,
            output = %$output,
            "Scanning input table"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pii_redactor::log_error_with_context;
/// use pii_redactor::domain::RedactorError;
///
/// let error = RedactorError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
