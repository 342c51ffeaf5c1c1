//! Domain error types
//!
//! This module defines the error hierarchy for the redactor. Errors are
//! domain-specific and don't expose third-party types.
//!
//! Note that the classification engine itself never fails: a payload that
//! cannot be decoded is a normal outcome of classification, not an error.

use thiserror::Error;

/// Main redactor error type
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input file structure errors (missing header columns, broken quoting)
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Audit trail errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Row-level problem found while reading input
///
/// Rows carrying one of these are skipped; the scan continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row has fewer columns than the header requires
    #[error("row {line}: missing column '{column}'")]
    MissingColumn { line: usize, column: String },

    /// The record identifier is not an integer
    #[error("row {line}: invalid record_id '{value}'")]
    InvalidRecordId { line: usize, value: String },

    /// A quoted field is still open at end of input
    #[error("row {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

impl RowError {
    /// Line number (1-based, header is line 1) the error was raised for
    pub fn line(&self) -> usize {
        match self {
            Self::MissingColumn { line, .. }
            | Self::InvalidRecordId { line, .. }
            | Self::UnterminatedQuote { line } => *line,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedactorError {
    fn from(err: std::io::Error) -> Self {
        RedactorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RedactorError {
    fn from(err: serde_json::Error) -> Self {
        RedactorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedactorError {
    fn from(err: toml::de::Error) -> Self {
        RedactorError::Configuration(format!("TOML parse error: {err}"))
    }
}
