//! Step logger port.

use super::execution_context::ExecutionContext;
use crate::domain::errors::LogResult;

/// Records one audit event for a pipeline step.
///
/// Implementations persist exactly one line per successful call and never
/// hold a raw (unmasked) context value past the call.
pub trait StepLogger: Send + Sync {
    /// Log `message` together with the redacted context of `context`.
    fn log(&self, message: &str, context: &dyn ExecutionContext) -> LogResult<()>;
}
