//! Scan coordinator
//!
//! Drives rows from a source through the classifier and into a sink, one
//! record at a time, in input order.

use crate::adapters::traits::{RecordSink, RecordSource};
use crate::config::RedactorConfig;
use crate::core::scan::summary::ScanSummary;
use crate::detection::{AuditLogger, PiiClassifier};
use crate::domain::{OutputRecord, RedactorError, Result};
use anyhow::Context;
use std::time::Instant;

/// Coordinates a scan of one input table
pub struct ScanCoordinator {
    classifier: PiiClassifier,
    pii_only: bool,
    audit_logger: Option<AuditLogger>,
}

impl ScanCoordinator {
    /// Create a coordinator
    ///
    /// With `pii_only` set, only rows classified as PII are forwarded to the
    /// sink; every row is still classified and counted.
    pub fn new(classifier: PiiClassifier, pii_only: bool) -> Self {
        Self {
            classifier,
            pii_only,
            audit_logger: None,
        }
    }

    /// Attach an audit logger
    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit_logger = Some(logger);
        self
    }

    /// Build a coordinator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the patterns fail to compile or the audit log
    /// directory cannot be created.
    pub fn from_config(config: &RedactorConfig) -> anyhow::Result<Self> {
        let classifier = PiiClassifier::with_threshold(config.scan.combination_threshold)?;
        let mut coordinator = Self::new(classifier, config.scan.pii_only);

        if config.audit.enabled {
            let logger = AuditLogger::new(config.audit.log_path.clone(), config.audit.json_format)
                .context("Failed to initialize audit logger")?;
            coordinator = coordinator.with_audit_logger(logger);
        }

        Ok(coordinator)
    }

    /// Classifier in use
    pub fn classifier(&self) -> &PiiClassifier {
        &self.classifier
    }

    /// Run the scan
    ///
    /// Row-level problems are logged and counted in the summary; they never
    /// abort the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink or the audit log cannot be written.
    pub fn run(&self, source: impl RecordSource, sink: &mut dyn RecordSink) -> Result<ScanSummary> {
        let start = Instant::now();
        let mut summary = ScanSummary::new();

        tracing::info!(
            pii_only = self.pii_only,
            combination_threshold = self.classifier.combination_threshold(),
            audit = self.audit_logger.is_some(),
            "Starting scan"
        );

        for row in source {
            let input = match row {
                Ok(input) => input,
                Err(e) => {
                    tracing::warn!(line = e.line(), error = %e, "Skipping row");
                    summary.add_skipped(e);
                    continue;
                }
            };

            let processed = self.classifier.process_record(input.id, &input.payload);
            tracing::debug!(
                record_id = %processed.record_id,
                is_pii = processed.is_pii,
                detections = processed.detections.len(),
                "Record processed"
            );

            if let Some(ref logger) = self.audit_logger {
                logger
                    .log_record(&processed)
                    .map_err(|e| RedactorError::Audit(format!("{e:#}")))?;
            }

            summary.add_record(&processed);

            if self.pii_only && !processed.is_pii {
                continue;
            }

            sink.write_record(&OutputRecord::new(
                processed.record_id,
                processed.payload,
                processed.is_pii,
            ))?;
            summary.add_written();
        }

        sink.finish()?;

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
