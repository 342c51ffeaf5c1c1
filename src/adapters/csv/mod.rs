//! CSV table adapter
//!
//! Input tables carry `record_id` and `data_json` columns; output tables
//! carry `record_id`, `redacted_data_json` and `is_pii`.

pub mod reader;
pub mod writer;

pub use reader::CsvRecordReader;
pub use writer::CsvRecordWriter;
