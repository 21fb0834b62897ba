use crate::CoreError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File whose presence marks a directory as a monorepo root.
pub const MONOREPO_MARKER: &str = ".monorepo";

/// What the scaffolder knows about the directory it was started in.
///
/// Probed once at startup and passed down explicitly; nothing re-checks the
/// marker behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceContext {
    pub cwd: PathBuf,
    pub initialized: bool,
}

impl WorkspaceContext {
    pub fn probe(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let initialized = cwd.join(MONOREPO_MARKER).is_file();
        debug!(
            "workspace probe: {} (initialized: {initialized})",
            cwd.display()
        );
        Self { cwd, initialized }
    }

    pub fn probe_current_dir() -> Result<Self, CoreError> {
        Ok(Self::probe(std::env::current_dir()?))
    }

    pub fn require_initialized(&self) -> Result<&Path, CoreError> {
        if self.initialized {
            Ok(&self.cwd)
        } else {
            Err(CoreError::NotInitialized(self.cwd.clone()))
        }
    }
}

/// Write the marker file into `root`.
pub fn mark_monorepo(root: &Path) -> Result<(), CoreError> {
    std::fs::write(root.join(MONOREPO_MARKER), b"")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_empty_dir_is_uninitialized() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = WorkspaceContext::probe(dir.path());
        assert!(!ctx.initialized);
        assert!(matches!(
            ctx.require_initialized(),
            Err(CoreError::NotInitialized(_))
        ));
    }

    #[test]
    fn probe_sees_marker() {
        let dir = tempfile::tempdir().unwrap();
        mark_monorepo(dir.path()).unwrap();
        let ctx = WorkspaceContext::probe(dir.path());
        assert!(ctx.initialized);
        assert_eq!(ctx.require_initialized().unwrap(), dir.path());
    }

    #[test]
    fn marker_directory_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MONOREPO_MARKER)).unwrap();
        assert!(!WorkspaceContext::probe(dir.path()).initialized);
    }
}
