//! Infrastructure layer module
//!
//! This module contains the concrete adapters behind the domain ports:
//! - Rotating JSON lines sink and secret masking
//! - Configuration management
//! - In-memory execution context
//! - Directory resolution
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod context;
pub mod directories;
pub mod logging;
