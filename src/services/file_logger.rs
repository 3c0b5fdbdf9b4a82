//! File logger facade
//!
//! Wires the [`ContextBuilder`] and the [`RotatingFileSink`] together behind
//! the [`StepLogger`] port. Collaborators are injected at construction; the
//! sink is created by [`FileLogger::initialize`] and owned by the facade.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, error, info, warn};

use crate::domain::errors::{LogError, LogResult, SinkError};
use crate::domain::models::{Config, LogEvent, SinkConfig, WriteFailurePolicy};
use crate::domain::ports::{DirectoryResolver, ExecutionContext, SecretMasker, StepLogger};
use crate::infrastructure::directories::FixedDirectoryResolver;
use crate::infrastructure::logging::{RotatingFileSink, RotationSettings};
use crate::services::context_builder::ContextBuilder;

/// Directory under the diagnostics root holding the audit file
pub const LOGS_DIRECTORY: &str = "logs";

/// Name of the current audit file
pub const LOG_FILE_NAME: &str = "full_log.log";

/// `<diagnostics_root>/logs/full_log.log`
pub fn log_file_path(diagnostics_root: &Path) -> PathBuf {
    diagnostics_root.join(LOGS_DIRECTORY).join(LOG_FILE_NAME)
}

/// Audit logger writing one redacted JSON line per step event.
///
/// `initialize` must run before the first `log`. Initializing again swaps in
/// a new sink for whatever path the resolver returns now; the last
/// initializer wins and nothing from the previous file is migrated.
pub struct FileLogger {
    resolver: Arc<dyn DirectoryResolver>,
    builder: ContextBuilder,
    sink_config: SinkConfig,
    sink: RwLock<Option<Arc<RotatingFileSink>>>,
}

impl FileLogger {
    /// Create an uninitialized logger from its collaborators.
    pub fn new(
        resolver: Arc<dyn DirectoryResolver>,
        masker: Arc<dyn SecretMasker>,
        sink_config: SinkConfig,
    ) -> Self {
        Self {
            resolver,
            builder: ContextBuilder::new(masker),
            sink_config,
            sink: RwLock::new(None),
        }
    }

    /// Create an uninitialized logger rooted at `config.diagnostics.root`.
    pub fn from_config(config: &Config, masker: Arc<dyn SecretMasker>) -> Self {
        Self::new(
            Arc::new(FixedDirectoryResolver::from(&config.diagnostics)),
            masker,
            config.sink.clone(),
        )
    }

    /// Resolve the log path, create its directory and open the sink.
    ///
    /// Returns the path of the current audit file. On error no sink is
    /// installed (a previously installed one stays in place).
    pub fn initialize(&self) -> LogResult<PathBuf> {
        let path = log_file_path(&self.resolver.diagnostics_root());
        let sink = RotatingFileSink::open(&path, RotationSettings::from(&self.sink_config))?;

        let mut slot = self.sink.write().map_err(|_| SinkError::Poisoned)?;
        if let Some(previous) = slot.as_ref() {
            warn!(
                previous = %previous.path().display(),
                path = %path.display(),
                "re-initializing file logger, previous log state is not migrated"
            );
        }
        *slot = Some(Arc::new(sink));

        info!(path = %path.display(), "file logger initialized");
        Ok(path)
    }

    /// Whether `initialize` has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.sink.read().is_ok_and(|slot| slot.is_some())
    }

    /// Path of the current audit file, if initialized.
    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.current_sink().ok().map(|sink| sink.path().to_path_buf())
    }

    fn current_sink(&self) -> LogResult<Arc<RotatingFileSink>> {
        let slot = self.sink.read().map_err(|_| SinkError::Poisoned)?;
        slot.as_ref().map(Arc::clone).ok_or(LogError::NotInitialized)
    }
}

impl StepLogger for FileLogger {
    fn log(&self, message: &str, context: &dyn ExecutionContext) -> LogResult<()> {
        let sink = self.current_sink()?;
        let event = LogEvent::information(message, self.builder.build(context));

        match sink.write(&event) {
            Ok(()) => {
                debug!(
                    event_message = message,
                    step = %event.context.step_name,
                    "step event logged"
                );
                Ok(())
            }
            Err(e) => match self.sink_config.on_write_failure {
                WriteFailurePolicy::Fail => Err(e.into()),
                WriteFailurePolicy::Continue if e.event_persisted() => {
                    error!(
                        error = %e,
                        path = %sink.path().display(),
                        "step event logged but rotation failed"
                    );
                    Ok(())
                }
                WriteFailurePolicy::Continue => {
                    error!(
                        error = %e,
                        event_message = message,
                        path = %sink.path().display(),
                        "dropping step event after write failure"
                    );
                    Ok(())
                }
            },
        }
    }
}
