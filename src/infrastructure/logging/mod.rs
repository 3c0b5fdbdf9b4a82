//! Logging infrastructure
//!
//! - Size-rotated JSON lines sink for audit events
//! - Pattern and literal secret masking
//! - Tracing subscriber setup for the crate's own diagnostics
pub mod logger;
pub mod rotation;
pub mod secret_masking;

pub use logger::init_tracing;
pub use rotation::{archive_path, RotatingFileSink, RotationSettings};
pub use secret_masking::{PatternSecretMasker, MASK};
