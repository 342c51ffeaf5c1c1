//! CSV row source
//!
//! Reads a table with a header row that names at least `record_id` and
//! `data_json`. Fields follow RFC 4180 quoting: a quoted field may contain
//! commas, line breaks and doubled quotes (`""`).

use crate::domain::{InputRecord, RecordId, RedactorError, Result, RowError};
use std::path::Path;
use std::str::FromStr;

/// Column holding the record identifier
pub const RECORD_ID_COLUMN: &str = "record_id";
/// Column holding the JSON payload
pub const DATA_JSON_COLUMN: &str = "data_json";

/// Reader yielding one [`InputRecord`] per data row
#[derive(Debug)]
pub struct CsvRecordReader {
    content: String,
    pos: usize,
    line: usize,
    id_index: usize,
    payload_index: usize,
}

impl CsvRecordReader {
    /// Open a CSV file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the header lacks a
    /// required column.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RedactorError::Io(format!("Failed to read input file {}: {e}", path.display()))
        })?;
        Self::from_string(content)
    }

    /// Parse CSV held in memory
    pub fn from_string(content: impl Into<String>) -> Result<Self> {
        let mut content = content.into();
        if content.starts_with('\u{feff}') {
            content.drain(..'\u{feff}'.len_utf8());
        }

        let mut reader = Self {
            content,
            pos: 0,
            line: 1,
            id_index: 0,
            payload_index: 0,
        };

        let header = match reader.next_row() {
            Some(Ok((_, fields))) => fields,
            Some(Err(e)) => {
                return Err(RedactorError::InputFormat(format!("Invalid header: {e}")))
            }
            None => return Err(RedactorError::InputFormat("Input is empty".to_string())),
        };

        reader.id_index = column_index(&header, RECORD_ID_COLUMN)?;
        reader.payload_index = column_index(&header, DATA_JSON_COLUMN)?;

        tracing::debug!(columns = header.len(), "CSV header parsed");
        Ok(reader)
    }

    /// Parse the next row, skipping blank lines
    ///
    /// Returns the line the row starts on together with its fields.
    fn next_row(&mut self) -> Option<std::result::Result<(usize, Vec<String>), RowError>> {
        loop {
            if self.pos >= self.content.len() {
                return None;
            }

            let start_line = self.line;
            let rest = &self.content[self.pos..];
            let mut fields = Vec::new();
            let mut field = String::new();
            let mut in_quotes = false;
            let mut quoted = false;
            let mut newlines = 0;
            let mut consumed = rest.len();
            let mut chars = rest.char_indices().peekable();

            while let Some((idx, c)) = chars.next() {
                if in_quotes {
                    match c {
                        '"' if matches!(chars.peek(), Some((_, '"'))) => {
                            chars.next();
                            field.push('"');
                        }
                        '"' => in_quotes = false,
                        '\n' => {
                            newlines += 1;
                            field.push(c);
                        }
                        _ => field.push(c),
                    }
                    continue;
                }

                match c {
                    '"' if field.is_empty() => {
                        in_quotes = true;
                        quoted = true;
                    }
                    ',' => fields.push(std::mem::take(&mut field)),
                    '\r' => {}
                    '\n' => {
                        newlines += 1;
                        consumed = idx + 1;
                        break;
                    }
                    _ => field.push(c),
                }
            }

            self.pos += consumed;
            self.line += newlines;

            if in_quotes {
                self.pos = self.content.len();
                return Some(Err(RowError::UnterminatedQuote { line: start_line }));
            }

            if fields.is_empty() && field.is_empty() && !quoted {
                continue;
            }

            fields.push(field);
            return Some(Ok((start_line, fields)));
        }
    }

    fn to_record(
        &self,
        line: usize,
        fields: &[String],
    ) -> std::result::Result<InputRecord, RowError> {
        let raw_id = fields
            .get(self.id_index)
            .ok_or_else(|| RowError::MissingColumn {
                line,
                column: RECORD_ID_COLUMN.to_string(),
            })?;
        let payload = fields
            .get(self.payload_index)
            .ok_or_else(|| RowError::MissingColumn {
                line,
                column: DATA_JSON_COLUMN.to_string(),
            })?;
        let id = RecordId::from_str(raw_id).map_err(|_| RowError::InvalidRecordId {
            line,
            value: raw_id.clone(),
        })?;

        Ok(InputRecord::new(id, payload.clone()))
    }
}

impl Iterator for CsvRecordReader {
    type Item = std::result::Result<InputRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(
            self.next_row()?
                .and_then(|(line, fields)| self.to_record(line, &fields)),
        )
    }
}

fn column_index(header: &[String], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| {
            RedactorError::InputFormat(format!(
                "Missing required column '{column}' (found: {})",
                header.join(", ")
            ))
        })
}
