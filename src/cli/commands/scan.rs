//! Scan command implementation
//!
//! This module implements the `scan` command: classify every row of an input
//! table and write the redacted rows to the output table.

use crate::adapters::csv::{CsvRecordReader, CsvRecordWriter};
use crate::adapters::traits::{NullSink, RecordSink};
use crate::config::{load_config_or_default, RedactorConfig};
use crate::core::scan::ScanCoordinator;
use crate::log_scan_start;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input CSV file with record_id and data_json columns
    pub input: PathBuf,

    /// Output CSV file (overrides scan.output_path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write clean rows too, not only the flagged ones
    #[arg(long)]
    pub include_clean: bool,

    /// Classify without writing the output table
    #[arg(long)]
    pub dry_run: bool,

    /// Signals needed to flag a record by combination (overrides scan.combination_threshold)
    #[arg(long, value_name = "N")]
    pub threshold: Option<usize>,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!("Starting scan command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(2);
        }

        let reader = match CsvRecordReader::from_path(&self.input) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, input = %self.input.display(), "Failed to open input");
                eprintln!("❌ Failed to read input file {}", self.input.display());
                eprintln!("   Error: {e}");
                return Ok(3); // Input error exit code
            }
        };

        let coordinator = ScanCoordinator::from_config(&config)?;

        let mut sink: Box<dyn RecordSink> = if self.dry_run {
            tracing::info!("Dry run mode enabled - no output will be written");
            println!("🔍 DRY RUN MODE - No output will be written");
            println!();
            Box::new(NullSink)
        } else {
            log_scan_start!(self.input.display(), config.scan.output_path.display());
            Box::new(CsvRecordWriter::create(&config.scan.output_path)?)
        };

        println!("🚀 Scanning {}...", self.input.display());
        println!();

        let summary = match coordinator.run(reader, sink.as_mut()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Scan failed");
                eprintln!("❌ Scan failed: {e}");
                if !self.dry_run {
                    sink.abort();
                    eprintln!(
                        "   No output written; {} was left unchanged",
                        config.scan.output_path.display()
                    );
                }
                return Ok(5); // Fatal error exit code
            }
        };

        println!("{}", summary.format_console());

        if !self.dry_run {
            println!(
                "✅ Wrote {} rows to {}",
                summary.rows_written,
                config.scan.output_path.display()
            );
        }

        if summary.is_successful() {
            Ok(0)
        } else {
            println!("⚠️  Scan completed with {} skipped rows", summary.skipped_rows);
            Ok(1) // Partial success exit code
        }
    }

    fn apply_overrides(&self, config: &mut RedactorConfig) {
        if let Some(ref output) = self.output {
            tracing::info!(output = %output.display(), "Overriding output path from CLI");
            config.scan.output_path = output.clone();
        }

        if self.include_clean {
            tracing::info!("Forwarding clean rows from CLI");
            config.scan.pii_only = false;
        }

        if let Some(threshold) = self.threshold {
            tracing::info!(threshold, "Overriding combination threshold from CLI");
            config.scan.combination_threshold = threshold;
        }

        if self.dry_run && config.audit.enabled {
            tracing::info!("Dry run - audit trail disabled");
            config.audit.enabled = false;
        }
    }
}
