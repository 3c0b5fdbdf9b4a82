//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the audit pipeline consumes and exposes:
//! - ExecutionContext: raw pipeline/job/step values for the current unit of work
//! - SecretMasker: redaction of secret substrings
//! - DirectoryResolver: location of the diagnostics root
//! - StepLogger: the `log(message, context)` entry point
//!
//! Concrete adapters live in the infrastructure layer; services depend only
//! on these traits.

pub mod directory_resolver;
pub mod execution_context;
pub mod secret_masker;
pub mod step_logger;

pub use directory_resolver::DirectoryResolver;
pub use execution_context::{EnvEntry, ExecutionContext};
pub use secret_masker::SecretMasker;
pub use step_logger::StepLogger;
