//! Configuration file loading with precedence handling.

use crate::parser::{ClassifierConfig, DEFAULT_DEBUG_API_MARKER, DEFAULT_TAG};
use crate::source::{default_log_file, DEFAULT_BACKFILL_BYTES};
use crate::state::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EDLOG_CONFIG";

/// Environment variable naming the log file to tail.
pub const FILE_ENV: &str = "EDLOG_FILE";

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/edlog/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Log file to tail.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Retained entries.
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Bytes read from the end of the file on start.
    #[serde(default)]
    pub backfill_bytes: Option<u64>,

    /// Poll interval in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Start with every entry expanded.
    #[serde(default)]
    pub expand_all: Option<bool>,

    /// Rows above the bottom edge that still count as "at the bottom".
    #[serde(default)]
    pub resume_slack: Option<usize>,

    /// Header substrings that mark application messages.
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Marker that keeps bracketed debug-API frames out of headers.
    #[serde(default)]
    pub debug_api_marker: Option<String>,

    /// Verbose tracing output.
    #[serde(default)]
    pub debug_logs: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Where copied entries are written.
    #[serde(default)]
    pub copy_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Log file to tail.
    pub file: PathBuf,
    /// Retained entries.
    pub capacity: usize,
    /// Backfill window in bytes.
    pub backfill_bytes: u64,
    /// Poll interval in milliseconds.
    pub tick_ms: u64,
    /// Start expanded.
    pub expand_all: bool,
    /// Smart-resume slack in rows.
    pub resume_slack: usize,
    /// Application tags.
    pub tags: Vec<String>,
    /// Debug-API marker.
    pub debug_api_marker: String,
    /// Verbose tracing output.
    pub debug_logs: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Where copied entries are written.
    pub copy_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            file: default_log_file().unwrap_or_else(|| PathBuf::from("Editor.log")),
            capacity: DEFAULT_CAPACITY,
            backfill_bytes: DEFAULT_BACKFILL_BYTES,
            tick_ms: DEFAULT_TICK_MS,
            expand_all: false,
            resume_slack: 0,
            tags: vec![DEFAULT_TAG.to_string()],
            debug_api_marker: DEFAULT_DEBUG_API_MARKER.to_string(),
            debug_logs: false,
            log_file_path: default_log_path(),
            copy_file_path: default_copy_path(),
        }
    }
}

impl ResolvedConfig {
    /// Classifier settings from this config.
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            tags: self.tags.clone(),
            debug_api_marker: self.debug_api_marker.clone(),
        }
    }
}

fn state_file(name: &str) -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("edlog").join(name),
        None => PathBuf::from(name),
    }
}

/// Resolve default log file path for tracing output.
///
/// Returns `~/.local/state/edlog/edlog.log` on Unix-like systems, or the
/// current directory if no state directory exists.
pub fn default_log_path() -> PathBuf {
    state_file("edlog.log")
}

/// Resolve default path for copied entries (`<state_dir>/edlog/copied.log`).
pub fn default_copy_path() -> PathBuf {
    state_file("copied.log")
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/edlog/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("edlog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `EDLOG_CONFIG` environment variable
/// 3. Default path `~/.config/edlog/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or if `EDLOG_CONFIG` is set to a non-UTF-8 value.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()))
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `EDLOG_FILE`: Override the tailed file
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(file) = std::env::var_os(FILE_ENV).filter(|v| !v.is_empty()) {
        config.file = PathBuf::from(file);
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        file: config.file.unwrap_or(defaults.file),
        capacity: config.capacity.unwrap_or(defaults.capacity),
        backfill_bytes: config.backfill_bytes.unwrap_or(defaults.backfill_bytes),
        tick_ms: config.tick_ms.unwrap_or(defaults.tick_ms),
        expand_all: config.expand_all.unwrap_or(defaults.expand_all),
        resume_slack: config.resume_slack.unwrap_or(defaults.resume_slack),
        tags: config.tags.unwrap_or(defaults.tags),
        debug_api_marker: config.debug_api_marker.unwrap_or(defaults.debug_api_marker),
        debug_logs: config.debug_logs.unwrap_or(defaults.debug_logs),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        copy_file_path: config.copy_file_path.unwrap_or(defaults.copy_file_path),
    }
}

/// Values given explicitly on the command line.
///
/// `None` means "flag not given", so lower-precedence sources win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Positional log file.
    pub file: Option<PathBuf>,
    /// `--capacity`.
    pub capacity: Option<usize>,
    /// `--backfill-bytes`.
    pub backfill_bytes: Option<u64>,
    /// `--tick-ms`.
    pub tick_ms: Option<u64>,
    /// `--expand-all`.
    pub expand_all: Option<bool>,
    /// `--debug-logs`.
    pub debug_logs: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(file) = cli.file {
        config.file = file;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    if let Some(backfill_bytes) = cli.backfill_bytes {
        config.backfill_bytes = backfill_bytes;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(expand_all) = cli.expand_all {
        config.expand_all = expand_all;
    }
    if let Some(debug_logs) = cli.debug_logs {
        config.debug_logs = debug_logs;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
