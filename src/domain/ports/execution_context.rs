//! Execution context port.

/// One env entry as declared on the context.
///
/// The value is `None` when the entry holds non-string data.
pub type EnvEntry = (String, Option<String>);

/// Read-only view of the pipeline unit of work being logged.
///
/// Every accessor is optional: a context that cannot supply a value returns
/// `None` and the caller degrades to an empty field.
pub trait ExecutionContext {
    /// Env entries in declaration order, or `None` when the context has no
    /// env collection at all.
    fn env(&self) -> Option<Vec<EnvEntry>>;

    /// A named value from the pipeline context (`workflow`, `run_id`,
    /// `run_number`, `run_attempt`, `repository`, `sha`, `ref`, `actor`).
    fn pipeline_value(&self, name: &str) -> Option<String>;

    /// Display name of the root (job) record.
    fn job_name(&self) -> Option<String>;

    /// Display name of the current (step) record.
    fn step_name(&self) -> Option<String>;
}
