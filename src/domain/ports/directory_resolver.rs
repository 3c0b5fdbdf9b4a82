//! Directory resolver port.

use std::path::PathBuf;

/// Resolves host directories used by the audit pipeline.
pub trait DirectoryResolver: Send + Sync {
    /// Root of the diagnostics tree. The audit file lives under `logs/`.
    fn diagnostics_root(&self) -> PathBuf;
}
