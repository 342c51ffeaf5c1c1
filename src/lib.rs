// PII Redactor - PII detection and masking for tabular JSON records
// Copyright (c) 2025 PII Redactor Contributors
// Licensed under the MIT License

//! # PII Redactor
//!
//! Classifies JSON records as containing personally identifiable information
//! and masks the offending fields.
//!
//! ## Overview
//!
//! Each record is a flat JSON object carried in one row of a CSV table. A
//! record is flagged when:
//! - **Standalone PII**: any field value contains a phone number, Aadhar
//!   number, passport number or payment handle
//! - **Combinatorial PII**: no standalone hit, but enough weak identity
//!   signals (full name, email, address, device or IP) co-occur
//!
//! Flagged fields are masked in place, keeping the rest of the record intact.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Scan orchestration and reporting
//! - [`detection`] - Pattern matching, combination policy, masking, audit
//! - [`adapters`] - Tabular input and output
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use pii_redactor::detection::PiiClassifier;
//! use pii_redactor::domain::RecordId;
//!
//! # fn main() -> anyhow::Result<()> {
//! let classifier = PiiClassifier::new()?;
//! let record = classifier.process_record(
//!     RecordId::new(1),
//!     r#"{"phone": "9876543210", "city": "Pune"}"#,
//! );
//!
//! assert!(record.is_pii);
//! assert_eq!(record.payload, r#"{"phone": "98XXXXXX10", "city": "Pune"}"#);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod logging;
