//! Domain layer for the steplog audit pipeline
//!
//! This module contains the record types, configuration model, errors and the
//! port traits the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{LogError, LogResult, SinkError};
