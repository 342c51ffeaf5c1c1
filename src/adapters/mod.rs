//! External collaborators for the redactor.
//!
//! - [`traits`] - Row source and row sink abstractions
//! - [`csv`] - CSV implementation of both
//!
//! # Design Pattern
//!
//! Adapters isolate the tabular format from the classification engine. The
//! scan coordinator depends only on [`traits::RecordSource`] and
//! [`traits::RecordSink`], so tests can drive it with in-memory rows.
//!
//! ```rust,no_run
//! use pii_redactor::adapters::csv::{CsvRecordReader, CsvRecordWriter};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = CsvRecordReader::from_path("input.csv")?;
//! let writer = CsvRecordWriter::create("redacted_output.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod traits;

pub use traits::{MemorySink, NullSink, RecordSink, RecordSource};
