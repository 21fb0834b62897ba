use crate::CoreError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Template applied to the monorepo root during init.
pub const MONOREPO_TEMPLATE: &str = "monorepo";
/// Shared build configuration (tsconfig, tsup, eslint) for compiled units.
pub const COMMON_TEMPLATE: &str = "common";

/// A directory of named templates; each template is a subdirectory whose
/// tree is copied verbatim into a destination.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.template_dir(name).is_dir()
    }

    /// Recursively copy template `name` into `dest`, creating directories
    /// and overwriting existing files. Returns the number of files copied.
    pub fn copy(&self, name: &str, dest: &Path) -> Result<usize, CoreError> {
        let src = self.template_dir(name);
        if !src.is_dir() {
            return Err(CoreError::TemplateNotFound(src));
        }
        info!("copying template '{name}' into {}", dest.display());
        std::fs::create_dir_all(dest)?;

        let mut copied = 0;
        for entry in WalkDir::new(&src).follow_links(false).min_depth(1) {
            let entry = entry?;
            let rel = entry
                .path()
                .strip_prefix(&src)
                .map_err(|e| std::io::Error::other(format!("template path outside root: {e}")))?;
            let target = dest.join(rel);
            let file_type = entry.file_type();
            if file_type.is_dir() {
                std::fs::create_dir_all(&target)?;
            } else if file_type.is_file() {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(entry.path(), &target)?;
                copied += 1;
            } else {
                debug!("skipping non-regular template entry {}", entry.path().display());
            }
        }
        debug!("template '{name}': {copied} files");
        Ok(copied)
    }
}

/// Delete `<dir>/.git` if present. Returns whether anything was removed.
pub fn remove_git_dir(dir: &Path) -> Result<bool, CoreError> {
    let git_dir = dir.join(".git");
    if !git_dir.exists() {
        return Ok(false);
    }
    info!("removing {}", git_dir.display());
    if git_dir.is_dir() {
        std::fs::remove_dir_all(&git_dir)?;
    } else {
        std::fs::remove_file(&git_dir)?;
    }
    Ok(true)
}
