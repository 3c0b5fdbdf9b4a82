//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use steplog::domain::ports::SecretMasker;
use steplog::infrastructure::directories::FixedDirectoryResolver;
use steplog::{FileLogger, SinkConfig};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Sink config with the given rotation threshold and retention
pub fn sink_config(max_file_size_bytes: u64, max_retained_files: usize) -> SinkConfig {
    SinkConfig {
        max_file_size_bytes,
        max_retained_files,
        ..SinkConfig::default()
    }
}

/// Build and initialize a file logger rooted at `root`
pub fn initialized_logger(
    root: &Path,
    masker: impl SecretMasker + 'static,
    config: SinkConfig,
) -> FileLogger {
    let logger = FileLogger::new(
        Arc::new(FixedDirectoryResolver::new(root)),
        Arc::new(masker),
        config,
    );
    logger.initialize().expect("Failed to initialize file logger");
    logger
}

/// Masker that leaves values untouched
pub fn passthrough(value: &str) -> String {
    value.to_string()
}

/// Parse every line of a log file as JSON, panicking on a malformed line
pub fn read_json_lines(path: &Path) -> Vec<serde_json::Value> {
    let contents = std::fs::read_to_string(path).expect("Failed to read log file");
    contents
        .lines()
        .map(|line| {
            serde_json::from_str(line)
                .unwrap_or_else(|e| panic!("Malformed log line {line:?}: {e}"))
        })
        .collect()
}
