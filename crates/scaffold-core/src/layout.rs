use crate::context::MONOREPO_MARKER;
use scaffold_schema::{UnitDescriptor, UnitKind};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// Directory layout of a generated monorepo.
///
/// Apps live under `apps/<name>`, packages under `packages/<name>`.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn apps_dir(&self) -> PathBuf {
        self.root.join(UnitKind::App.scope())
    }

    #[inline]
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(UnitKind::Package.scope())
    }

    pub fn unit_dir(&self, unit: &UnitDescriptor) -> PathBuf {
        let parent = match unit.kind {
            UnitKind::App => self.apps_dir(),
            UnitKind::Package => self.packages_dir(),
        };
        parent.join(unit.name.as_str())
    }

    #[inline]
    pub fn manifest_path(&self, unit: &UnitDescriptor) -> PathBuf {
        self.unit_dir(unit).join(MANIFEST_FILE)
    }

    #[inline]
    pub fn marker_file(&self) -> PathBuf {
        self.root.join(MONOREPO_MARKER)
    }

    /// `packages/database/.env`, written during init.
    #[inline]
    pub fn database_env_file(&self) -> PathBuf {
        self.packages_dir().join("database").join(".env")
    }
}
