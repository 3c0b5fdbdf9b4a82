//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "steplog.yaml";

/// Prefix of environment variable overrides (`STEPLOG_SINK__MAX_RETAINED_FILES`)
pub const ENV_PREFIX: &str = "STEPLOG_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `sink.max_file_size_bytes` was zero.
    #[error("Invalid max_file_size_bytes: {0}. Must be greater than 0")]
    InvalidMaxFileSize(u64),

    /// `tracing.level` is not a known level name.
    #[error("Invalid tracing level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `diagnostics.root` was empty.
    #[error("Diagnostics root cannot be empty")]
    EmptyDiagnosticsRoot,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. steplog.yaml in the working directory (optional)
    /// 3. Environment variables (STEPLOG_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from_file(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.diagnostics.root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDiagnosticsRoot);
        }

        if config.sink.max_file_size_bytes == 0 {
            return Err(ConfigError::InvalidMaxFileSize(
                config.sink.max_file_size_bytes,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.tracing.level.to_lowercase();
        if !valid_log_levels.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.tracing.level.clone()));
        }

        Ok(())
    }
}
