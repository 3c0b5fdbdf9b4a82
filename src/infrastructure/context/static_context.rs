//! In-memory execution context.

use std::collections::HashMap;

use crate::domain::ports::{EnvEntry, ExecutionContext};

/// Execution context assembled from plain values.
///
/// Useful for hosts that already hold the step metadata as strings, and for
/// tests. Env entries keep their insertion order, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct StaticExecutionContext {
    env: Option<Vec<EnvEntry>>,
    pipeline: HashMap<String, String>,
    job_name: Option<String>,
    step_name: Option<String>,
}

impl StaticExecutionContext {
    /// A context with no env collection and no values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string env entry, creating the env collection if needed.
    #[must_use]
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(Vec::new)
            .push((key.into(), Some(value.into())));
        self
    }

    /// Append an env entry whose data is not a string.
    #[must_use]
    pub fn with_non_string_env(mut self, key: impl Into<String>) -> Self {
        self.env.get_or_insert_with(Vec::new).push((key.into(), None));
        self
    }

    /// Expose an env collection even when it has no entries.
    #[must_use]
    pub fn with_empty_env(mut self) -> Self {
        if self.env.is_none() {
            self.env = Some(Vec::new());
        }
        self
    }

    /// Set a pipeline context value such as `workflow` or `sha`.
    #[must_use]
    pub fn with_pipeline_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pipeline.insert(name.into(), value.into());
        self
    }

    /// Set the job (root record) display name.
    #[must_use]
    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    /// Set the step display name.
    #[must_use]
    pub fn with_step_name(mut self, name: impl Into<String>) -> Self {
        self.step_name = Some(name.into());
        self
    }
}

impl ExecutionContext for StaticExecutionContext {
    fn env(&self) -> Option<Vec<EnvEntry>> {
        self.env.clone()
    }

    fn pipeline_value(&self, name: &str) -> Option<String> {
        self.pipeline.get(name).cloned()
    }

    fn job_name(&self) -> Option<String> {
        self.job_name.clone()
    }

    fn step_name(&self) -> Option<String> {
        self.step_name.clone()
    }
}
