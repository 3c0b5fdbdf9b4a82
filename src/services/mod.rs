//! Service layer
//!
//! - ContextBuilder: redacted record assembly from an execution context
//! - FileLogger: the audit logging facade

pub mod context_builder;
pub mod file_logger;

pub use context_builder::{normalize_env_key, ContextBuilder, ENV_KEY_PREFIX};
pub use file_logger::{log_file_path, FileLogger, LOGS_DIRECTORY, LOG_FILE_NAME};
