//! Record classification engine
//!
//! This module provides the [`PiiClassifier`] that composes standalone
//! detection, combinatorial detection and field masking for one record.
//!
//! # Behavior
//!
//! 1. Every field value is tested against the standalone grammars; matching
//!    fields are masked using the rule registered for that field's name.
//! 2. Only when no field matched, the combination of quasi-identifying fields
//!    is evaluated over the original mapping. If it meets the threshold, the
//!    `name`, `email`, `address`, `device_id` and `ip_address` fields are run
//!    through the redactor.
//! 3. A payload that isn't a JSON object is echoed verbatim and left unflagged.
//!
//! # Examples
//!
//! ```
//! use pii_redactor::detection::PiiClassifier;
//! use pii_redactor::domain::RecordId;
//!
//! let classifier = PiiClassifier::new()?;
//! let result = classifier.process_record(
//!     RecordId::new(1),
//!     r#"{"phone": "9876543210", "city": "Pune"}"#,
//! );
//! assert!(result.is_pii);
//! assert_eq!(result.payload, r#"{"phone": "98XXXXXX10", "city": "Pune"}"#);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::detection::{
    combinatorial::{CombinatorialDetector, DEFAULT_COMBINATION_THRESHOLD},
    encoding::encode_record,
    models::{
        Classification, DetectionMethod, FieldDetection, ProcessedRecord, RecordOutcome,
    },
    patterns::PatternSet,
    redactor::FieldRedactor,
    standalone::{value_text, StandaloneDetector},
};
use crate::domain::RecordId;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

/// Fields re-run through the redactor when a record is flagged by combination
///
/// `device_id` and `ip_address` have no masking rule and pass through.
pub const COMBINATION_REDACTION_FIELDS: [&str; 5] =
    ["name", "email", "address", "device_id", "ip_address"];

/// PII classifier and redactor
///
/// # Thread Safety
///
/// The compiled pattern set is shared through an `Arc` and never mutated, so
/// a classifier can be cloned or shared across threads freely.
#[derive(Debug, Clone)]
pub struct PiiClassifier {
    standalone: StandaloneDetector,
    combinatorial: CombinatorialDetector,
    redactor: FieldRedactor,
}

impl PiiClassifier {
    /// Create a classifier with the default combination threshold
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in patterns fail to compile.
    pub fn new() -> Result<Self> {
        Self::with_threshold(DEFAULT_COMBINATION_THRESHOLD)
    }

    /// Create a classifier with a custom combination threshold
    pub fn with_threshold(threshold: usize) -> Result<Self> {
        let patterns = PatternSet::new().context("Failed to compile PII patterns")?;
        Ok(Self::from_patterns(Arc::new(patterns), threshold))
    }

    /// Create a classifier over an existing pattern set
    pub fn from_patterns(patterns: Arc<PatternSet>, threshold: usize) -> Self {
        Self {
            standalone: StandaloneDetector::new(Arc::clone(&patterns)),
            combinatorial: CombinatorialDetector::new(threshold),
            redactor: FieldRedactor::new(patterns),
        }
    }

    /// Check whether a single value contains a standalone PII token
    pub fn detect_standalone_pii(&self, text: &str) -> bool {
        self.standalone.detect(text)
    }

    /// Check whether a record's combination of fields constitutes PII
    pub fn detect_combinatorial_pii(&self, record: &Map<String, Value>) -> bool {
        self.combinatorial.detect(record)
    }

    /// Return the masked replacement for a field value
    pub fn redact_value(&self, field: &str, value: &Value) -> Value {
        self.redactor.redact_value(field, value)
    }

    /// Combination threshold in use
    pub fn combination_threshold(&self) -> usize {
        self.combinatorial.threshold()
    }

    /// Classify and redact one decoded record
    pub fn classify(&self, record: Map<String, Value>) -> Classification {
        let mut detections = Vec::new();
        let mut redacted = Map::with_capacity(record.len());

        for (field, value) in &record {
            let text = value_text(value);
            if !self.standalone.detect(&text) {
                redacted.insert(field.clone(), value.clone());
                continue;
            }

            let masked = self.redactor.redact_value(field, value);
            tracing::debug!(field = %field, "Standalone PII detected");
            detections.push(FieldDetection {
                field: field.clone(),
                method: DetectionMethod::Pattern,
                categories: self.standalone.categories(&text),
                original_value: text.into_owned(),
                redacted: masked != *value,
            });
            redacted.insert(field.clone(), masked);
        }

        if !detections.is_empty() {
            return Classification {
                data: redacted,
                is_pii: true,
                detections,
            };
        }

        if !self.combinatorial.detect(&record) {
            return Classification {
                data: redacted,
                is_pii: false,
                detections,
            };
        }

        tracing::debug!("Combinatorial PII detected");
        for field in COMBINATION_REDACTION_FIELDS {
            if let Some(value) = redacted.get_mut(field) {
                let masked = self.redactor.redact_value(field, value);
                detections.push(FieldDetection {
                    field: field.to_string(),
                    method: DetectionMethod::Combination,
                    categories: Vec::new(),
                    original_value: value_text(value).into_owned(),
                    redacted: masked != *value,
                });
                *value = masked;
            }
        }

        Classification {
            data: redacted,
            is_pii: true,
            detections,
        }
    }

    /// Decode, classify and re-encode one raw record
    ///
    /// Never fails: a payload that isn't a JSON object is returned verbatim
    /// with the PII flag cleared.
    pub fn process_record(&self, record_id: RecordId, payload: &str) -> ProcessedRecord {
        let start = Instant::now();

        let record = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::warn!(
                    record_id = %record_id,
                    kind = json_kind(&other),
                    "Payload is not a JSON object, passing through"
                );
                return malformed(record_id, payload, start);
            }
            Err(e) => {
                tracing::warn!(
                    record_id = %record_id,
                    error = %e,
                    "Malformed payload, passing through"
                );
                return malformed(record_id, payload, start);
            }
        };

        let classification = self.classify(record);
        let encoded = match encode_record(&classification.data) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(record_id = %record_id, error = %e, "Failed to encode record");
                Value::Object(classification.data).to_string()
            }
        };

        ProcessedRecord {
            record_id,
            payload: encoded,
            is_pii: classification.is_pii,
            outcome: RecordOutcome::Classified,
            detections: classification.detections,
            processing_time_us: start.elapsed().as_micros() as u64,
        }
    }
}

fn malformed(record_id: RecordId, payload: &str, start: Instant) -> ProcessedRecord {
    ProcessedRecord {
        record_id,
        payload: payload.to_string(),
        is_pii: false,
        outcome: RecordOutcome::MalformedPayload,
        detections: Vec::new(),
        processing_time_us: start.elapsed().as_micros() as u64,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::PiiCategory;
    use serde_json::json;

    fn classifier() -> PiiClassifier {
        PiiClassifier::new().unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_engine_creation() {
        let c = classifier();
        assert_eq!(c.combination_threshold(), DEFAULT_COMBINATION_THRESHOLD);
    }

    #[test]
    fn test_phone_record_end_to_end() {
        let result =
            classifier().process_record(RecordId::new(1), r#"{"phone": "9876543210", "city": "Pune"}"#);

        assert!(result.is_pii);
        assert_eq!(result.outcome, RecordOutcome::Classified);
        let decoded: Value = serde_json::from_str(&result.payload).unwrap();
        assert_eq!(decoded, json!({"phone": "98XXXXXX10", "city": "Pune"}));
        assert_eq!(result.detections.len(), 1);
        assert_eq!(result.detections[0].categories, vec![PiiCategory::Phone]);
    }

    #[test]
    fn test_malformed_payload_echoed() {
        let payload = r#"{"phone": "9876543210", "city": "#;
        let result = classifier().process_record(RecordId::new(2), payload);

        assert!(!result.is_pii);
        assert!(result.is_malformed());
        assert_eq!(result.payload, payload);
    }

    #[test]
    fn test_non_object_payload_echoed() {
        let result = classifier().process_record(RecordId::new(3), r#"["9876543210"]"#);
        assert!(!result.is_pii);
        assert!(result.is_malformed());
        assert_eq!(result.payload, r#"["9876543210"]"#);
    }

    #[test]
    fn test_key_order_preserved() {
        let result = classifier().process_record(
            RecordId::new(4),
            r#"{"zeta": 1, "phone": "9876543210", "alpha": "x"}"#,
        );
        assert_eq!(
            result.payload,
            r#"{"zeta": 1, "phone": "98XXXXXX10", "alpha": "x"}"#
        );
    }

    #[test]
    fn test_combination_redacts_quasi_identifiers() {
        let record = object(json!({
            "name": "Jane Doe",
            "email": "jane@corp",
            "city": "Pune"
        }));
        let result = classifier().classify(record);

        assert!(result.is_pii);
        assert!(!result.has_pattern_detections());
        assert_eq!(result.data["name"], json!("JXXX DXXX"));
        assert_eq!(result.data["email"], json!("jaXXX@corp"));
        assert_eq!(result.data["city"], json!("Pune"));
    }

    #[test]
    fn test_combination_passes_device_fields_through() {
        let record = object(json!({
            "name": "Jane Doe",
            "device_id": "DEV-001",
            "ip_address": "192.168.1.1"
        }));
        let result = classifier().classify(record);

        assert!(result.is_pii);
        assert_eq!(result.data["device_id"], json!("DEV-001"));
        assert_eq!(result.data["ip_address"], json!("192.168.1.1"));
        let device = result
            .detections
            .iter()
            .find(|d| d.field == "device_id")
            .unwrap();
        assert_eq!(device.method, DetectionMethod::Combination);
        assert!(!device.redacted);
    }

    #[test]
    fn test_single_quasi_identifier_not_flagged() {
        let record = object(json!({"name": "Jane Doe", "city": "Pune"}));
        let result = classifier().classify(record.clone());

        assert!(!result.is_pii);
        assert!(result.detections.is_empty());
        assert_eq!(result.data, record);
    }

    #[test]
    fn test_standalone_hit_skips_combination_pass() {
        // The email value matches the payment-handle grammar, so only that
        // field is masked; the name is left alone.
        let record = object(json!({"name": "Jane Doe", "email": "jane@x.com"}));
        let result = classifier().classify(record);

        assert!(result.is_pii);
        assert_eq!(result.data["name"], json!("Jane Doe"));
        assert_eq!(result.data["email"], json!("jaXXX@x.com"));
    }

    #[test]
    fn test_numeric_phone_flagged_but_not_masked() {
        let record = object(json!({"phone": 9876543210_i64}));
        let result = classifier().classify(record);

        assert!(result.is_pii);
        assert_eq!(result.data["phone"], json!(9876543210_i64));
        assert!(!result.detections[0].redacted);
    }

    #[test]
    fn test_standalone_match_in_unruled_field() {
        let record = object(json!({"notes": "reach me at 9876543210"}));
        let result = classifier().classify(record);

        assert!(result.is_pii);
        assert_eq!(result.data["notes"], json!("reach me at 9876543210"));
    }

    #[test]
    fn test_key_set_preserved() {
        let record = object(json!({
            "name": "Jane Doe",
            "email": "jane@corp",
            "address": "4 Lake Road",
            "device_id": "d",
            "extra": null
        }));
        let keys: Vec<String> = record.keys().cloned().collect();
        let result = classifier().classify(record);
        let out: Vec<String> = result.data.keys().cloned().collect();
        assert_eq!(keys, out);
    }

    #[test]
    fn test_custom_threshold() {
        let c = PiiClassifier::with_threshold(3).unwrap();
        let record = object(json!({"name": "Jane Doe", "email": "jane@corp"}));
        assert!(!c.classify(record).is_pii);
    }
}
