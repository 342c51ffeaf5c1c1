//! Subscriber setup for `tracing`
//!
//! Human-readable events go to stderr so they never interleave with table
//! output on stdout. When file logging is enabled, the same events are also
//! written as JSON lines to a rotating file through a background writer.

use crate::config::LoggingConfig;
use crate::domain::{RedactorError, Result};
use std::path::Path;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log file name prefix inside the log directory
const LOG_FILE_PREFIX: &str = "pii-redactor.log";

/// Accepted level names
const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Keeps the background file writer alive
///
/// Dropping it flushes pending file output, so hold it until exit.
pub struct LoggingGuard {
    file_writer: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether a file writer is attached
    pub fn has_file_output(&self) -> bool {
        self.file_writer.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG`, when set, replaces the `pii_redactor=<level>` filter.
///
/// # Errors
///
/// Returns a configuration error if the level or rotation is unknown, the
/// log directory cannot be created, or a global subscriber is already set.
///
/// # Example
///
/// ```no_run
/// use pii_redactor::config::LoggingConfig;
/// use pii_redactor::logging::init_logging;
///
/// let _guard = init_logging("debug", &LoggingConfig::default())?;
/// tracing::debug!("visible");
/// # Ok::<(), pii_redactor::domain::RedactorError>(())
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("pii_redactor={level}")))
    };

    let mut layers = vec![console_layer(filter())];
    let mut file_writer = None;

    if config.local_enabled {
        let (layer, guard) = file_layer(config, filter())?;
        layers.push(layer);
        file_writer = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| {
            RedactorError::Configuration(format!("Logging is already initialized: {e}"))
        })?;

    tracing::debug!(
        %level,
        file_output = config.local_enabled,
        directory = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard { file_writer })
}

fn console_layer<S>(filter: EnvFilter) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter)
        .boxed()
}

fn file_layer<S>(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let rotation = parse_rotation(&config.local_rotation)?;
    let directory = Path::new(&config.local_path);

    std::fs::create_dir_all(directory).map_err(|e| {
        RedactorError::Configuration(format!(
            "Cannot create log directory {}: {e}",
            directory.display()
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

fn parse_log_level(name: &str) -> Result<Level> {
    let wanted = name.to_lowercase();
    LEVELS
        .iter()
        .find(|(level_name, _)| *level_name == wanted)
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            let names: Vec<&str> = LEVELS.iter().map(|(n, _)| *n).collect();
            RedactorError::Configuration(format!(
                "Unknown log level '{name}', expected one of: {}",
                names.join(", ")
            ))
        })
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        other => Err(RedactorError::Configuration(format!(
            "Unknown log rotation '{other}', expected daily or hourly"
        ))),
    }
}
