//! Domain errors for the steplog audit pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the rotating file sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log directory could not be created.
    #[error("Failed to create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The current log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Appending a line failed; any torn bytes were cut off again.
    #[error("Failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the current file to its archive name failed.
    #[error("Failed to rotate {from} to {to}: {source}")]
    Rotate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Existing archives could not be listed.
    #[error("Failed to list archived logs in {dir}: {source}")]
    ScanArchives {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An archive beyond the retention limit could not be deleted.
    #[error("Failed to remove archived log {path}: {source}")]
    RemoveArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The event could not be serialized.
    #[error("Failed to serialize log event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The line was written but the rotation it triggered failed.
    #[error("Event written but rotation failed: {0}")]
    RotationAfterWrite(#[source] Box<SinkError>),

    /// A writer panicked while holding the sink lock.
    #[error("Log sink lock poisoned")]
    Poisoned,
}

impl SinkError {
    /// Whether the event reached the log file despite this error.
    pub const fn event_persisted(&self) -> bool {
        matches!(self, Self::RotationAfterWrite(_))
    }
}

/// Errors surfaced by the logger facade.
#[derive(Debug, Error)]
pub enum LogError {
    /// `log` was called before `initialize`.
    #[error("File logger used before initialize()")]
    NotInitialized,

    /// The sink failed to open or persist.
    #[error("Log sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Result alias for logger operations.
pub type LogResult<T> = Result<T, LogError>;
