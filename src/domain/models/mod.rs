//! Records and configuration model.

pub mod config;
pub mod context_record;
pub mod log_event;

pub use config::{
    Config, DiagnosticsConfig, SinkConfig, TracingConfig, TracingFormat, WriteFailurePolicy,
};
pub use context_record::{ContextRecord, EnvMap};
pub use log_event::{LogEvent, LogLevel};
