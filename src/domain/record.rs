//! Row-level domain models
//!
//! The shapes exchanged between the tabular collaborators and the
//! classification engine: an input row carries an identifier and an opaque
//! JSON payload, an output row carries the re-encoded payload and the PII flag.

use super::ids::RecordId;
use serde::{Deserialize, Serialize};

/// One row read from the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Record identifier
    pub id: RecordId,
    /// Raw JSON payload, not yet decoded
    pub payload: String,
}

impl InputRecord {
    /// Creates a new input record
    pub fn new(id: RecordId, payload: impl Into<String>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }
}

/// One row destined for the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Record identifier, unchanged from the input
    pub id: RecordId,
    /// Re-encoded (possibly redacted) payload
    pub payload: String,
    /// Whether the record was classified as containing PII
    pub is_pii: bool,
}

impl OutputRecord {
    /// Creates a new output record
    pub fn new(id: RecordId, payload: impl Into<String>, is_pii: bool) -> Self {
        Self {
            id,
            payload: payload.into(),
            is_pii,
        }
    }
}
