//! Builds the redacted [`ContextRecord`] attached to each audit event.

use std::collections::btree_map::Entry;
use std::sync::Arc;

use crate::domain::models::{ContextRecord, EnvMap};
use crate::domain::ports::{EnvEntry, ExecutionContext, SecretMasker};

/// Env key prefix stripped (case-insensitively) during normalization.
pub const ENV_KEY_PREFIX: &str = "log_";

/// Normalize an env key: drop a leading `log_` in any case, then lower-case.
///
/// `log_TOKEN`, `LOG_token` and `token` all normalize to `token`.
pub fn normalize_env_key(key: &str) -> String {
    let stripped = match key.get(..ENV_KEY_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(ENV_KEY_PREFIX) => &key[ENV_KEY_PREFIX.len()..],
        _ => key,
    };
    stripped.to_lowercase()
}

/// Turns an execution context into a fully-masked [`ContextRecord`].
///
/// Never fails: missing values become empty strings, a missing env collection
/// leaves `env` absent.
#[derive(Clone)]
pub struct ContextBuilder {
    masker: Arc<dyn SecretMasker>,
}

impl ContextBuilder {
    /// Builder masking every value through `masker`.
    pub fn new(masker: Arc<dyn SecretMasker>) -> Self {
        Self { masker }
    }

    /// Build a record from `context`, masking each stored value exactly once.
    pub fn build(&self, context: &dyn ExecutionContext) -> ContextRecord {
        ContextRecord {
            env: context.env().map(|entries| self.build_env(entries)),
            workflow_name: self.masked(context.pipeline_value("workflow")),
            job_name: self.masked(context.job_name()),
            step_name: self.masked(context.step_name()),
            run_id: self.masked(context.pipeline_value("run_id")),
            run_number: self.masked(context.pipeline_value("run_number")),
            run_attempt: self.masked(context.pipeline_value("run_attempt")),
            repository: self.masked(context.pipeline_value("repository")),
            sha: self.masked(context.pipeline_value("sha")),
            git_ref: self.masked(context.pipeline_value("ref")),
            author: self.masked(context.pipeline_value("actor")),
        }
    }

    // First normalized key wins; later collisions are dropped unmasked.
    fn build_env(&self, entries: Vec<EnvEntry>) -> EnvMap {
        let mut env = EnvMap::new();
        for (key, value) in entries {
            if let Entry::Vacant(slot) = env.entry(normalize_env_key(&key)) {
                slot.insert(self.masked(value));
            }
        }
        env
    }

    fn masked(&self, value: Option<String>) -> String {
        self.masker.mask(value.as_deref().unwrap_or_default())
    }
}
