//! Execution context adapters

pub mod static_context;

pub use static_context::StaticExecutionContext;
