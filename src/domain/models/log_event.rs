//! The unit persisted by the audit sink: one JSON object per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context_record::ContextRecord;

/// Severity written with each event. The audit file has a single fixed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Routine pipeline event.
    Information,
}

/// A single audit log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// UTC creation time, serialized as RFC3339.
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Caller-supplied text, stored as given.
    pub message: String,
    /// Redacted context of the step.
    pub context: ContextRecord,
}

impl LogEvent {
    /// Create an informational event stamped with the current time.
    pub fn information(message: impl Into<String>, context: ContextRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Information,
            message: message.into(),
            context,
        }
    }

    /// Serialize the event as one newline-terminated JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
