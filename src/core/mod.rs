//! Core orchestration.
//!
//! # Modules
//!
//! - [`scan`] - Scan coordination and summary reporting
//!
//! # Scan Workflow
//!
//! 1. **Read**: Pull one row from the record source
//! 2. **Classify**: Decode the payload, detect and redact PII
//! 3. **Audit** (optional): Append a hashed entry for flagged records
//! 4. **Forward**: Hand the row to the sink (flagged rows only, by default)
//! 5. **Report**: Produce a scan summary
//!
//! # Example
//!
//! ```rust,no_run
//! use pii_redactor::adapters::csv::{CsvRecordReader, CsvRecordWriter};
//! use pii_redactor::config::RedactorConfig;
//! use pii_redactor::core::scan::ScanCoordinator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedactorConfig::default();
//! let coordinator = ScanCoordinator::from_config(&config)?;
//!
//! let reader = CsvRecordReader::from_path("input.csv")?;
//! let mut writer = CsvRecordWriter::create(&config.scan.output_path)?;
//! let summary = coordinator.run(reader, &mut writer)?;
//!
//! println!("Flagged {} records", summary.pii_records);
//! # Ok(())
//! # }
//! ```

pub mod scan;
