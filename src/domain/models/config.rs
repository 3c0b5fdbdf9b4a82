//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for steplog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Where the diagnostics root lives
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Audit file rotation and failure handling
    #[serde(default)]
    pub sink: SinkConfig,

    /// The crate's own operational tracing output
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// Diagnostics directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiagnosticsConfig {
    /// Root directory; the audit file is written to `<root>/logs/full_log.log`
    #[serde(default = "default_diagnostics_root")]
    pub root: PathBuf,
}

fn default_diagnostics_root() -> PathBuf {
    PathBuf::from("_diag")
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            root: default_diagnostics_root(),
        }
    }
}

/// Audit sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SinkConfig {
    /// Rotate once the current file grows past this many bytes
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Number of archived files kept next to the current one
    #[serde(default = "default_max_retained_files")]
    pub max_retained_files: usize,

    /// Request `sync_data` after every appended line
    #[serde(default)]
    pub sync_on_write: bool,

    /// What `log` does when the sink cannot persist a line
    #[serde(default)]
    pub on_write_failure: WriteFailurePolicy,
}

const fn default_max_file_size_bytes() -> u64 {
    1024 * 1024 * 1024
}

const fn default_max_retained_files() -> usize {
    20
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            max_retained_files: default_max_retained_files(),
            sync_on_write: false,
            on_write_failure: WriteFailurePolicy::default(),
        }
    }
}

/// Handling of a line that could not be written.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Return the error to the caller of `log`.
    #[default]
    Fail,
    /// Report the error through tracing and keep going.
    Continue,
}

/// Operational tracing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TracingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_tracing_level")]
    pub level: String,

    /// Output format: json or pretty
    #[serde(default)]
    pub format: TracingFormat,
}

fn default_tracing_level() -> String {
    "info".to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            format: TracingFormat::default(),
        }
    }
}

/// Output format of the operational tracing layer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    /// One JSON object per event
    Json,
    /// Human-readable multi-line output
    #[default]
    Pretty,
}
