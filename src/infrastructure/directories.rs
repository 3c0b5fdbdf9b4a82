//! Directory resolver adapters.

use std::path::PathBuf;

use crate::domain::models::DiagnosticsConfig;
use crate::domain::ports::DirectoryResolver;

/// Resolver returning a diagnostics root fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDirectoryResolver {
    root: PathBuf,
}

impl FixedDirectoryResolver {
    /// Resolver always answering `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl From<&DiagnosticsConfig> for FixedDirectoryResolver {
    fn from(config: &DiagnosticsConfig) -> Self {
        Self::new(config.root.clone())
    }
}

impl DirectoryResolver for FixedDirectoryResolver {
    fn diagnostics_root(&self) -> PathBuf {
        self.root.clone()
    }
}
