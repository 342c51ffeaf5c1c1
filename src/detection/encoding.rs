//! Payload re-encoding
//!
//! Redacted records are written with `", "` and `": "` separators and every
//! character outside printable ASCII escaped as `\uXXXX` (UTF-16 units,
//! lowercase hex), matching the output files of earlier releases of the tool.
//! Numbers keep the exact text they were read with.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Formatter producing spaced separators and ASCII-only strings
///
/// Quotes, backslashes and control characters keep serde_json's default
/// escapes, which already use the `\u00XX` form.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut plain_start = 0;
        for (index, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[plain_start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            plain_start = index + ch.len_utf8();
        }
        writer.write_all(fragment[plain_start..].as_bytes())
    }
}

/// Encode a record in the output payload format
///
/// # Errors
///
/// Returns an error only if serialization itself fails, which cannot happen
/// for a map of JSON values.
pub fn encode_record(record: &Map<String, Value>) -> serde_json::Result<String> {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
    record.serialize(&mut serializer)?;
    // Every non-ASCII character was escaped above
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
