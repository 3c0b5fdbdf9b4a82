//! Steplog - redacted audit logging for job-execution pipelines
//!
//! Steplog writes one structured JSON line per significant pipeline event to
//! `<diagnostics root>/logs/full_log.log`, masking secrets in every context
//! value before it reaches disk, and rotates the file by size with bounded
//! retention of archives.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Records, configuration model, errors and ports
//! - **Service Layer** (`services`): Context building and the logger facade
//! - **Infrastructure Layer** (`infrastructure`): Rotating sink, masking,
//!   configuration loading and simple port adapters
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use steplog::infrastructure::context::StaticExecutionContext;
//! use steplog::infrastructure::logging::PatternSecretMasker;
//! use steplog::{ConfigLoader, FileLogger, StepLogger};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let masker = PatternSecretMasker::with_default_patterns()?.with_value("abc123");
//!
//!     let logger = FileLogger::from_config(&config, Arc::new(masker));
//!     logger.initialize()?;
//!
//!     let context = StaticExecutionContext::new()
//!         .with_pipeline_value("workflow", "build")
//!         .with_env_var("log_TOKEN", "abc123");
//!     logger.log("Step started", &context)?;
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{LogError, LogResult, SinkError};
pub use domain::models::{
    Config, ContextRecord, DiagnosticsConfig, EnvMap, LogEvent, LogLevel, SinkConfig,
    TracingConfig, TracingFormat, WriteFailurePolicy,
};
pub use domain::ports::{DirectoryResolver, EnvEntry, ExecutionContext, SecretMasker, StepLogger};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{init_tracing, RotatingFileSink, RotationSettings};
pub use services::{ContextBuilder, FileLogger};
