//! Detection data models

use crate::domain::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category of standalone PII token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// Ten-digit phone number
    Phone,
    /// Twelve-digit national identity number
    Aadhar,
    /// One uppercase letter followed by seven digits
    Passport,
    /// Payment handle (`local@domain.tld` or `<10 digits>@handle`)
    Upi,
}

impl PiiCategory {
    /// All categories, in evaluation order
    pub const ALL: [PiiCategory; 4] = [Self::Phone, Self::Aadhar, Self::Passport, Self::Upi];

    /// Get human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "PHONE",
            Self::Aadhar => "AADHAR",
            Self::Passport => "PASSPORT",
            Self::Upi => "UPI",
        }
    }
}

/// How a field came to be treated as PII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// The value itself matched a token grammar
    Pattern,
    /// The record carried two or more quasi-identifying fields
    Combination,
}

/// A field that was flagged during classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDetection {
    /// Field name in the record
    pub field: String,
    /// Detection method that flagged the field
    pub method: DetectionMethod,
    /// Matched token categories (empty for combinational detections)
    pub categories: Vec<PiiCategory>,
    /// Original value, stringified (hashed in audit logs, never logged)
    pub original_value: String,
    /// Whether the masking transform changed the value
    pub redacted: bool,
}

/// Result of classifying one decoded record
///
/// `data` always has the same key set, in the same order, as the input
/// mapping; only values are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Possibly-redacted field mapping
    pub data: Map<String, Value>,
    /// Whether the record contains PII
    pub is_pii: bool,
    /// Fields that were flagged
    pub detections: Vec<FieldDetection>,
}

impl Classification {
    /// Check if any field was flagged by a standalone pattern
    pub fn has_pattern_detections(&self) -> bool {
        self.detections
            .iter()
            .any(|d| d.method == DetectionMethod::Pattern)
    }
}

/// Outcome of processing one raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Payload decoded and classified
    Classified,
    /// Payload was not a JSON object; echoed unchanged and unflagged
    MalformedPayload,
}

/// A processed record, ready for the output collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRecord {
    /// Record identifier
    pub record_id: RecordId,
    /// Re-encoded payload, or the original text for malformed payloads
    pub payload: String,
    /// Whether the record contains PII
    pub is_pii: bool,
    /// Whether the payload could be decoded
    pub outcome: RecordOutcome,
    /// Fields that were flagged
    pub detections: Vec<FieldDetection>,
    /// Processing time in microseconds
    pub processing_time_us: u64,
}

impl ProcessedRecord {
    /// Check if the payload was malformed
    pub fn is_malformed(&self) -> bool {
        self.outcome == RecordOutcome::MalformedPayload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(PiiCategory::Phone.label(), "PHONE");
        assert_eq!(PiiCategory::Aadhar.label(), "AADHAR");
        assert_eq!(PiiCategory::Passport.label(), "PASSPORT");
        assert_eq!(PiiCategory::Upi.label(), "UPI");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&PiiCategory::Upi).unwrap();
        assert_eq!(json, "\"UPI\"");
    }
}
