use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TEMPLATES_ENV: &str = "TURBO_SCAFFOLD_TEMPLATES";
const DEFAULT_PACKAGE_MANAGER: &str = "pnpm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            templates_dir: None,
        }
    }
}

fn default_package_manager() -> String {
    DEFAULT_PACKAGE_MANAGER.to_owned()
}

impl ScaffoldConfig {
    /// Load `~/.config/turbo-scaffold/config.toml`; a missing file or an
    /// unset `HOME` yields the defaults.
    pub fn load_default() -> Result<Self, CoreError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(format!("TOML serialization failed: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        package_manager: Option<&str>,
        templates_dir: Option<&Path>,
    ) -> Self {
        if let Some(pm) = package_manager {
            pm.clone_into(&mut self.package_manager);
        }
        if let Some(dir) = templates_dir {
            self.templates_dir = Some(dir.to_path_buf());
        }
        self
    }

    /// Templates root: the configured directory, else `$TURBO_SCAFFOLD_TEMPLATES`,
    /// else `~/.local/share/turbo-scaffold/templates`.
    pub fn resolve_templates_dir(&self) -> Result<PathBuf, CoreError> {
        if let Some(dir) = &self.templates_dir {
            return Ok(expand_tilde(dir));
        }
        if let Ok(dir) = std::env::var(TEMPLATES_ENV) {
            if !dir.is_empty() {
                return Ok(expand_tilde(Path::new(&dir)));
            }
        }
        let home = std::env::var("HOME").map_err(|_| {
            CoreError::Config(format!(
                "HOME not set; pass --templates or set {TEMPLATES_ENV}"
            ))
        })?;
        Ok(PathBuf::from(home).join(".local/share/turbo-scaffold/templates"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/turbo-scaffold/config.toml"))
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}
