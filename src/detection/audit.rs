//! Audit trail for flagged records
//!
//! One entry is appended per record classified as PII. Original values are
//! recorded only as SHA-256 digests, never in plaintext.

use crate::detection::models::{DetectionMethod, FieldDetection, PiiCategory, ProcessedRecord};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    record_id: i64,
    detections_count: usize,
    processing_time_us: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    field: String,
    method: DetectionMethod,
    categories: Vec<PiiCategory>,
    redacted: bool,
    /// SHA-256 hash of original value
    value_hash: String,
}

/// Append-only audit logger
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    /// Record a flagged record; unflagged records are ignored
    pub fn log_record(&self, record: &ProcessedRecord) -> Result<()> {
        if !record.is_pii {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            record_id: record.record_id.value(),
            detections_count: record.detections.len(),
            processing_time_us: record.processing_time_us,
            detections: record.detections.iter().map(audit_detection).collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            let fields: Vec<&str> = entry.detections.iter().map(|d| d.field.as_str()).collect();
            writeln!(
                file,
                "[{}] Record: {} | Detections: {} | Fields: {} | Time: {}us",
                entry.timestamp,
                entry.record_id,
                entry.detections_count,
                fields.join(","),
                entry.processing_time_us
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

fn audit_detection(detection: &FieldDetection) -> AuditDetection {
    AuditDetection {
        field: detection.field.clone(),
        method: detection.method,
        categories: detection.categories.clone(),
        redacted: detection.redacted,
        value_hash: hash_value(&detection.original_value),
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
