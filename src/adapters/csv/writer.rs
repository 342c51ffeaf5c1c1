//! CSV row sink
//!
//! File output is staged next to the target as `<name>.partial` and only
//! renamed into place when the scan finishes, so a failed scan never leaves a
//! truncated table behind.

use crate::adapters::traits::RecordSink;
use crate::domain::{OutputRecord, RedactorError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output header
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Writer producing `record_id,redacted_data_json,is_pii` rows
pub struct CsvRecordWriter<W: Write> {
    writer: W,
    rows_written: usize,
    staged: Option<StagedOutput>,
}

#[derive(Debug)]
struct StagedOutput {
    partial: PathBuf,
    target: PathBuf,
}

/// Staging path used while `target` is being written
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    target.with_file_name(name)
}

impl CsvRecordWriter<BufWriter<File>> {
    /// Stage an output file and write the header
    ///
    /// `path` itself is replaced only by [`RecordSink::finish`].
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RedactorError::Io(format!(
                        "Failed to create output directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        if path.file_name().is_none() {
            return Err(RedactorError::Io(format!(
                "Output path {} does not name a file",
                path.display()
            )));
        }

        let partial = partial_path(path);
        let file = File::create(&partial).map_err(|e| {
            RedactorError::Io(format!("Failed to create output file {}: {e}", partial.display()))
        })?;

        let mut writer = Self::new(BufWriter::new(file))?;
        writer.staged = Some(StagedOutput {
            partial,
            target: path.to_path_buf(),
        });
        Ok(writer)
    }
}

impl<W: Write> CsvRecordWriter<W> {
    /// Wrap a writer and write the header
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", OUTPUT_HEADER.join(","))
            .map_err(|e| RedactorError::Io(format!("writing CSV header: {e}")))?;
        Ok(Self {
            writer,
            rows_written: 0,
            staged: None,
        })
    }

    /// Number of data rows written
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Consume the sink and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for CsvRecordWriter<W> {
    fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        writeln!(
            self.writer,
            "{},{},{}",
            record.id,
            csv_escape(&record.payload),
            if record.is_pii { "True" } else { "False" }
        )
        .map_err(|e| RedactorError::Io(format!("writing CSV row for record {}: {e}", record.id)))?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| RedactorError::Io(format!("flushing CSV output: {e}")))?;

        if let Some(staged) = self.staged.take() {
            std::fs::rename(&staged.partial, &staged.target).map_err(|e| {
                RedactorError::Io(format!(
                    "Failed to rename {} to {}: {e}",
                    staged.partial.display(),
                    staged.target.display()
                ))
            })?;
            tracing::debug!(path = %staged.target.display(), "Output committed");
        }
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(staged) = self.staged.take() {
            if let Err(e) = std::fs::remove_file(&staged.partial) {
                tracing::warn!(
                    path = %staged.partial.display(),
                    error = %e,
                    "Failed to remove partial output"
                );
            }
        }
    }
}

/// Escape a string for CSV: quote if it contains comma, quote, or newline.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("hello"), "hello");
        assert_eq!(csv_escape("hello,world"), "\"hello,world\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("{}"), "{}");
    }

    #[test]
    fn test_write_rows() {
        let mut sink = CsvRecordWriter::new(Vec::new()).unwrap();
        sink.write_record(&OutputRecord::new(
            RecordId::new(1),
            r#"{"phone":"98XXXXXX10","city":"Pune"}"#,
            true,
        ))
        .unwrap();
        sink.write_record(&OutputRecord::new(RecordId::new(2), "{}", false))
            .unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.rows_written(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "record_id,redacted_data_json,is_pii\n\
             1,\"{\"\"phone\"\":\"\"98XXXXXX10\"\",\"\"city\"\":\"\"Pune\"\"}\",True\n\
             2,{},False\n"
        );
    }

    #[test]
    fn test_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("redacted.csv");
        let mut sink = CsvRecordWriter::create(&path).unwrap();
        sink.finish().unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "record_id,redacted_data_json,is_pii\n");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_output_staged_until_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redacted.csv");
        let mut sink = CsvRecordWriter::create(&path).unwrap();
        sink.write_record(&OutputRecord::new(RecordId::new(1), "{}", true))
            .unwrap();

        assert!(!path.exists());
        assert!(partial_path(&path).exists());

        sink.finish().unwrap();
        assert!(path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_abort_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redacted.csv");
        std::fs::write(&path, "previous run\n").unwrap();

        let mut sink = CsvRecordWriter::create(&path).unwrap();
        sink.write_record(&OutputRecord::new(RecordId::new(1), "{}", true))
            .unwrap();
        sink.abort();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run\n");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("out/redacted.csv")),
            PathBuf::from("out/redacted.csv.partial")
        );
    }
}
