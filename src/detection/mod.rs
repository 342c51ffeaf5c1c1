//! PII detection and redaction
//!
//! This module classifies one decoded record at a time and masks the values
//! it finds sensitive.
//!
//! # Architecture
//!
//! - **Patterns**: the compiled token grammars, built once and shared read-only
//! - **Standalone detection**: does a single value contain a phone number,
//!   national ID, passport number or payment handle?
//! - **Combinatorial detection**: do two or more quasi-identifying fields
//!   (full name, email, street address, device/IP) occur together?
//! - **Redaction**: field-name-driven masking rules
//! - **Engine**: record orchestration, including malformed payload handling
//! - **Encoding**: output payload text with spaced separators and ASCII escapes
//! - **Audit**: hashed trail of flagged records
//!
//! # Usage
//!
//! ```rust
//! use pii_redactor::detection::PiiClassifier;
//! use serde_json::json;
//!
//! let classifier = PiiClassifier::new()?;
//! assert!(classifier.detect_standalone_pii("A1234567"));
//! assert_eq!(
//!     classifier.redact_value("aadhar", &json!("123456789012")),
//!     json!("XXXX XXXX 9012")
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod audit;
pub mod combinatorial;
pub mod encoding;
pub mod engine;
pub mod models;
pub mod patterns;
pub mod redactor;
pub mod standalone;

// Re-export main types
pub use audit::AuditLogger;
pub use combinatorial::{CombinatorialDetector, Signal, SignalSet};
pub use encoding::encode_record;
pub use engine::PiiClassifier;
pub use models::{
    Classification, DetectionMethod, FieldDetection, PiiCategory, ProcessedRecord, RecordOutcome,
};
pub use patterns::PatternSet;
pub use redactor::{FieldRedactor, MaskRule};
pub use standalone::StandaloneDetector;
