//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RedactorConfig;
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "pii-redactor.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RedactorConfig
/// 4. Applies environment variable overrides (PII_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use pii_redactor::config::loader::load_config;
///
/// let config = load_config("pii-redactor.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RedactorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RedactorConfig = toml::from_str(&contents)
        .map_err(|e| RedactorError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Loads configuration, falling back to built-in defaults
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// used when present and the defaults otherwise. Environment overrides and
/// validation apply in every case.
///
/// # Errors
///
/// Returns an error if the selected file cannot be loaded or the resulting
/// configuration is invalid
pub fn load_config_or_default(path: Option<&Path>) -> Result<RedactorConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finalize(RedactorConfig::default())
        }
    }
}

fn finalize(mut config: RedactorConfig) -> Result<RedactorConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedactorError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Replaces `${VAR_NAME}` placeholders with environment values
///
/// Comment lines are copied as-is, so commented-out settings may reference
/// variables that are not set.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RedactorError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing: Vec<String> = Vec::new();

    let substituted: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            placeholder
                .replace_all(line, |caps: &regex::Captures<'_>| {
                    let name = &caps[1];
                    std::env::var(name).unwrap_or_else(|_| {
                        if !missing.iter().any(|m| m == name) {
                            missing.push(name.to_string());
                        }
                        caps[0].to_string()
                    })
                })
                .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(RedactorError::Configuration(format!(
            "Environment variables referenced but not set: {}",
            missing.join(", ")
        )));
    }

    let mut output = substituted.join("\n");
    output.push('\n');
    Ok(output)
}

/// Applies environment variable overrides using the PII_* prefix
///
/// Environment variables follow the pattern: PII_<SECTION>_<KEY>
/// For example: PII_SCAN_OUTPUT_PATH, PII_AUDIT_ENABLED
fn apply_env_overrides(config: &mut RedactorConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PII_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Scan overrides
    if let Ok(val) = std::env::var("PII_SCAN_OUTPUT_PATH") {
        config.scan.output_path = val.into();
    }
    if let Ok(val) = std::env::var("PII_SCAN_PII_ONLY") {
        config.scan.pii_only = parse_override("PII_SCAN_PII_ONLY", &val)?;
    }
    if let Ok(val) = std::env::var("PII_SCAN_COMBINATION_THRESHOLD") {
        config.scan.combination_threshold = parse_override("PII_SCAN_COMBINATION_THRESHOLD", &val)?;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("PII_AUDIT_ENABLED") {
        config.audit.enabled = parse_override("PII_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PII_AUDIT_LOG_PATH") {
        config.audit.log_path = val.into();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PII_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("PII_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PII_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RedactorError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}
