//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `REGISTRAR_BASE_URL`: Registry API base URL (required)
//! - `REGISTRAR_API_USER`: Registry account user (required)
//! - `REGISTRAR_API_KEY`: Registry API key (required)
//! - `REGISTRAR_CHECK_PATH`: Availability endpoint path
//! - `REGISTRAR_REGISTER_PATH`: Registration endpoint path
//! - `REGISTRAR_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `REGISTRAR_RETRY_DELAY_MS`: Fixed delay between attempts
//! - `REGISTRAR_MAX_RETRIES`: Attempts per call
//! - `REGISTRAR_FAILURE_POLICY`: `retry_all` or `stop_on_permanent`
//!
//! Schedules can only be declared in a config file.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./registrar.toml` or `./registrar.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use registrar_domain::{Config, FailurePolicy, RegistrarError, RegistryConfig, Result, RetryConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `RegistrarError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `RegistrarError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let mut registry = RegistryConfig::new(
        env_var("REGISTRAR_BASE_URL")?,
        env_var("REGISTRAR_API_USER")?,
        env_var("REGISTRAR_API_KEY")?,
    );

    if let Some(path) = optional_env("REGISTRAR_CHECK_PATH") {
        registry.check_path = path;
    }
    if let Some(path) = optional_env("REGISTRAR_REGISTER_PATH") {
        registry.register_path = path;
    }
    if let Some(timeout) = env_parse::<u64>("REGISTRAR_REQUEST_TIMEOUT_SECS")? {
        registry.request_timeout_secs = timeout;
    }

    let mut retry = RetryConfig::default();
    if let Some(delay) = env_parse::<u64>("REGISTRAR_RETRY_DELAY_MS")? {
        retry.retry_delay_ms = delay;
    }
    if let Some(max) = env_parse::<u32>("REGISTRAR_MAX_RETRIES")? {
        retry.max_retries = max;
    }
    if let Some(raw) = optional_env("REGISTRAR_FAILURE_POLICY") {
        retry.failure_policy = FailurePolicy::from_str(&raw).map_err(RegistrarError::Config)?;
    }

    Ok(Config { registry, retry, schedules: Vec::new() })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RegistrarError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RegistrarError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RegistrarError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RegistrarError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RegistrarError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RegistrarError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RegistrarError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["registrar.toml", "registrar.json", "config.toml", "config.json"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        RegistrarError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-empty environment variable, if set.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| RegistrarError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
