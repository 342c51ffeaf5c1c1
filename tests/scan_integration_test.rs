//! End-to-end scan tests over CSV files

use pii_redactor::adapters::csv::{CsvRecordReader, CsvRecordWriter};
use pii_redactor::config::RedactorConfig;
use pii_redactor::core::scan::ScanCoordinator;
use pii_redactor::detection::PiiCategory;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INPUT: &str = "record_id,data_json\n\
1,\"{\"\"phone\"\": \"\"9876543210\"\", \"\"city\"\": \"\"Pune\"\"}\"\n\
2,\"{\"\"city\"\": \"\"Delhi\"\"}\"\n\
3,\"{\"\"name\"\": \"\"Rahul Sharma\"\", \"\"address\"\": \"\"4 Park Street\"\"}\"\n\
x,\"{}\"\n\
5,not json\n";

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("input.csv");
    fs::write(&path, INPUT).unwrap();
    path
}

fn config(dir: &TempDir) -> RedactorConfig {
    let mut config = RedactorConfig::default();
    config.scan.output_path = dir.path().join("out").join("redacted.csv");
    config
}

fn scan(config: &RedactorConfig, input: &Path) -> pii_redactor::core::scan::ScanSummary {
    let coordinator = ScanCoordinator::from_config(config).unwrap();
    let reader = CsvRecordReader::from_path(input).unwrap();
    let mut writer = CsvRecordWriter::create(&config.scan.output_path).unwrap();
    coordinator.run(reader, &mut writer).unwrap()
}

#[test]
fn test_scan_writes_flagged_rows_only() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config = config(&dir);

    let summary = scan(&config, &input);

    let output = fs::read_to_string(&config.scan.output_path).unwrap();
    assert_eq!(
        output,
        "record_id,redacted_data_json,is_pii\n\
1,\"{\"\"phone\"\": \"\"98XXXXXX10\"\", \"\"city\"\": \"\"Pune\"\"}\",True\n\
3,\"{\"\"name\"\": \"\"RXXX SXXX\"\", \"\"address\"\": \"\"[REDACTED_ADDRESS]\"\"}\",True\n"
    );

    assert_eq!(summary.total_rows, 5);
    assert_eq!(summary.pii_records, 2);
    assert_eq!(summary.clean_records, 2);
    assert_eq!(summary.malformed_payloads, 1);
    assert_eq!(summary.skipped_rows, 1);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.combination_hits, 1);
    assert_eq!(summary.hits_by_category.get(&PiiCategory::Phone), Some(&1));
    assert!(!summary.is_successful());
}

#[test]
fn test_scan_include_clean_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let mut config = config(&dir);
    config.scan.pii_only = false;

    let summary = scan(&config, &input);
    assert_eq!(summary.rows_written, 4);

    let output = fs::read_to_string(&config.scan.output_path).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], "2,\"{\"\"city\"\": \"\"Delhi\"\"}\",False");
    assert_eq!(lines[4], "5,not json,False");
}

#[test]
fn test_scan_output_reads_back_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let mut config = config(&dir);
    config.scan.pii_only = false;
    scan(&config, &input);

    let output = fs::read_to_string(&config.scan.output_path)
        .unwrap()
        .replacen("redacted_data_json", "data_json", 1);
    let ids: Vec<i64> = CsvRecordReader::from_string(output)
        .unwrap()
        .map(|r| r.unwrap().id.value())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 5]);
}

#[test]
fn test_scan_with_audit_trail() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let mut config = config(&dir);
    config.audit.enabled = true;
    config.audit.log_path = dir.path().join("audit").join("redactions.log");

    scan(&config, &input);

    let audit = fs::read_to_string(&config.audit.log_path).unwrap();
    assert_eq!(audit.lines().count(), 2);
    assert!(!audit.contains("9876543210"));
    assert!(!audit.contains("Rahul Sharma"));
    for line in audit.lines() {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(entry["record_id"].is_number());
    }
}

#[test]
fn test_missing_column_is_input_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "id,payload\n1,{}\n").unwrap();

    assert!(CsvRecordReader::from_path(&path).is_err());
}
