//! Scan summary and reporting
//!
//! This module defines structures for tracking and reporting scan results.

use crate::detection::models::{DetectionMethod, PiiCategory, ProcessedRecord};
use crate::domain::RowError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Summary of a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Rows read from the source, including skipped ones
    pub total_rows: usize,

    /// Records classified as containing PII
    pub pii_records: usize,

    /// Records classified as clean (malformed payloads included)
    pub clean_records: usize,

    /// Records whose payload was not a JSON object
    pub malformed_payloads: usize,

    /// Rows that could not be turned into a record
    pub skipped_rows: usize,

    /// Rows handed to the sink
    pub rows_written: usize,

    /// Standalone detections per category
    pub hits_by_category: BTreeMap<PiiCategory, usize>,

    /// Records flagged by field combination
    pub combination_hits: usize,

    /// Duration of the scan
    #[serde(skip)]
    pub duration: Duration,

    /// Row errors, in input order
    #[serde(skip)]
    pub row_errors: Vec<RowError>,
}

impl ScanSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Account for a processed record
    pub fn add_record(&mut self, record: &ProcessedRecord) {
        self.total_rows += 1;

        if record.is_malformed() {
            self.malformed_payloads += 1;
        }

        if !record.is_pii {
            self.clean_records += 1;
            return;
        }

        self.pii_records += 1;
        let mut by_combination = false;
        for detection in &record.detections {
            match detection.method {
                DetectionMethod::Pattern => {
                    for category in &detection.categories {
                        *self.hits_by_category.entry(*category).or_insert(0) += 1;
                    }
                }
                DetectionMethod::Combination => by_combination = true,
            }
        }
        if by_combination {
            self.combination_hits += 1;
        }
    }

    /// Account for a skipped row
    pub fn add_skipped(&mut self, error: RowError) {
        self.total_rows += 1;
        self.skipped_rows += 1;
        self.row_errors.push(error);
    }

    /// Account for a written row
    pub fn add_written(&mut self) {
        self.rows_written += 1;
    }

    /// Check if every row could be processed
    pub fn is_successful(&self) -> bool {
        self.skipped_rows == 0
    }

    /// Share of processed records flagged as PII, as a percentage
    pub fn pii_rate(&self) -> f64 {
        let processed = self.pii_records + self.clean_records;
        if processed == 0 {
            return 0.0;
        }
        (self.pii_records as f64 / processed as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            pii_records = self.pii_records,
            clean_records = self.clean_records,
            malformed_payloads = self.malformed_payloads,
            skipped_rows = self.skipped_rows,
            rows_written = self.rows_written,
            combination_hits = self.combination_hits,
            duration_ms = self.duration.as_millis() as u64,
            "Scan completed"
        );

        if !self.is_successful() {
            tracing::warn!(
                skipped_rows = self.skipped_rows,
                "Scan completed with skipped rows"
            );
        }
    }

    /// Format the summary for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("📊 Scan Summary:\n");
        output.push_str(&format!("  Total Rows: {}\n", self.total_rows));
        output.push_str(&format!(
            "  PII Records: {} ({:.2}%)\n",
            self.pii_records,
            self.pii_rate()
        ));
        output.push_str(&format!("  Clean Records: {}\n", self.clean_records));
        output.push_str(&format!(
            "  Malformed Payloads: {}\n",
            self.malformed_payloads
        ));
        output.push_str(&format!("  Skipped Rows: {}\n", self.skipped_rows));
        output.push_str(&format!("  Rows Written: {}\n", self.rows_written));
        output.push_str(&format!(
            "  Duration: {:.2}s\n",
            self.duration.as_secs_f64()
        ));

        if !self.hits_by_category.is_empty() || self.combination_hits > 0 {
            output.push('\n');
            output.push_str("🔍 Detections:\n");
            for (category, count) in &self.hits_by_category {
                output.push_str(&format!("  {:<12} {}\n", category.label(), count));
            }
            if self.combination_hits > 0 {
                output.push_str(&format!(
                    "  {:<12} {}\n",
                    "COMBINATION", self.combination_hits
                ));
            }
        }

        if !self.row_errors.is_empty() {
            output.push('\n');
            output.push_str("⚠️  Skipped rows:\n");
            for error in self.row_errors.iter().take(10) {
                output.push_str(&format!("  - {error}\n"));
            }
            if self.row_errors.len() > 10 {
                output.push_str(&format!(
                    "  ... and {} more\n",
                    self.row_errors.len() - 10
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::{FieldDetection, RecordOutcome};
    use crate::domain::RecordId;

    fn processed(is_pii: bool, detections: Vec<FieldDetection>) -> ProcessedRecord {
        ProcessedRecord {
            record_id: RecordId::new(1),
            payload: "{}".to_string(),
            is_pii,
            outcome: RecordOutcome::Classified,
            detections,
            processing_time_us: 0,
        }
    }

    fn detection(method: DetectionMethod, categories: Vec<PiiCategory>) -> FieldDetection {
        FieldDetection {
            field: "f".to_string(),
            method,
            categories,
            original_value: String::new(),
            redacted: true,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = ScanSummary::new();
        assert!(summary.is_successful());
        assert_eq!(summary.pii_rate(), 0.0);
    }

    #[test]
    fn test_counts() {
        let mut summary = ScanSummary::new();
        summary.add_record(&processed(
            true,
            vec![detection(
                DetectionMethod::Pattern,
                vec![PiiCategory::Phone, PiiCategory::Upi],
            )],
        ));
        summary.add_record(&processed(
            true,
            vec![
                detection(DetectionMethod::Combination, vec![]),
                detection(DetectionMethod::Combination, vec![]),
            ],
        ));
        summary.add_record(&processed(false, vec![]));

        let mut malformed = processed(false, vec![]);
        malformed.outcome = RecordOutcome::MalformedPayload;
        summary.add_record(&malformed);

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.pii_records, 2);
        assert_eq!(summary.clean_records, 2);
        assert_eq!(summary.malformed_payloads, 1);
        assert_eq!(summary.combination_hits, 1);
        assert_eq!(summary.hits_by_category[&PiiCategory::Phone], 1);
        assert_eq!(summary.hits_by_category[&PiiCategory::Upi], 1);
        assert_eq!(summary.pii_rate(), 50.0);
    }

    #[test]
    fn test_skipped_rows() {
        let mut summary = ScanSummary::new();
        summary.add_skipped(RowError::InvalidRecordId {
            line: 3,
            value: "x".to_string(),
        });
        assert!(!summary.is_successful());
        assert_eq!(summary.total_rows, 1);
        assert!(summary.format_console().contains("row 3: invalid record_id 'x'"));
    }

    #[test]
    fn test_format_console() {
        let mut summary = ScanSummary::new();
        summary.add_record(&processed(
            true,
            vec![detection(DetectionMethod::Pattern, vec![PiiCategory::Aadhar])],
        ));
        let output = summary.format_console();
        assert!(output.contains("PII Records: 1 (100.00%)"));
        assert!(output.contains("AADHAR"));
        assert!(!output.contains("COMBINATION"));
    }
}
