//! Row source and sink abstractions
//!
//! The scan coordinator only depends on these traits, so the tabular format
//! can be swapped (or mocked in tests) without touching the engine.

use crate::domain::{InputRecord, OutputRecord, Result, RowError};

/// Source of input rows
///
/// Row-level problems are yielded as [`RowError`]s so the caller can skip the
/// row and carry on.
pub trait RecordSource: Iterator<Item = std::result::Result<InputRecord, RowError>> {}

impl<T> RecordSource for T where T: Iterator<Item = std::result::Result<InputRecord, RowError>> {}

/// Sink accepting output rows
pub trait RecordSink {
    /// Write one output row
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_record(&mut self, record: &OutputRecord) -> Result<()>;

    /// Flush any buffered output
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn finish(&mut self) -> Result<()>;

    /// Discard output after a failed scan
    fn abort(&mut self) {}
}

/// Sink that keeps rows in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Rows written so far
    pub records: Vec<OutputRecord>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that discards everything, used for dry runs
#[derive(Debug, Default)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn write_record(&mut self, _record: &OutputRecord) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
