//! Redacted execution-context record attached to every log event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized env key to masked value.
pub type EnvMap = BTreeMap<String, String>;

/// Fully-redacted snapshot of the unit of work a log event describes.
///
/// Every value held here has already been passed through a
/// [`SecretMasker`](crate::domain::ports::SecretMasker). Records are built
/// fresh for each log call and moved into the event that persists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    /// Env collection of the context, absent when the context exposes none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvMap>,
    /// Workflow name from the pipeline context.
    pub workflow_name: String,
    /// Display name of the job record.
    pub job_name: String,
    /// Display name of the step record.
    pub step_name: String,
    /// Run identifier.
    pub run_id: String,
    /// Run number within the workflow.
    pub run_number: String,
    /// Attempt number of the run.
    pub run_attempt: String,
    /// Repository the run belongs to.
    pub repository: String,
    /// Commit being built.
    pub sha: String,
    /// Git ref being built.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Actor that triggered the run.
    pub author: String,
}
