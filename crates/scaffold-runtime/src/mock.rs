use crate::package_manager::PackageManager;
use crate::RuntimeError;
use scaffold_schema::DependencySpec;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A call recorded by [`MockPackageManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Add { dir: PathBuf, specs: Vec<String> },
    AddDev { dir: PathBuf, specs: Vec<String> },
    Install { dir: PathBuf },
    CreateNextApp { dir: PathBuf },
}

/// Package manager that records calls instead of spawning processes.
///
/// `create_next_app` creates the target directory so later scaffold steps
/// find it, and a failure can be injected for a chosen call index.
#[derive(Debug, Default)]
pub struct MockPackageManager {
    calls: Mutex<Vec<Invocation>>,
    fail_at: Option<usize>,
}

impl MockPackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th recorded call (0-based) fail.
    #[must_use]
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Invocation) -> Result<(), RuntimeError> {
        let mut calls = self.calls.lock().map_err(|e| {
            RuntimeError::Io(std::io::Error::other(format!("mutex poisoned: {e}")))
        })?;
        debug!("mock package manager: {call:?}");
        let index = calls.len();
        calls.push(call);
        if self.fail_at == Some(index) {
            return Err(RuntimeError::CommandFailed {
                command: format!("mock call #{index}"),
                status: "exit status: 1".to_owned(),
                detail: String::new(),
            });
        }
        Ok(())
    }
}

fn to_strings(specs: &[DependencySpec]) -> Vec<String> {
    specs.iter().map(ToString::to_string).collect()
}

impl PackageManager for MockPackageManager {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn available(&self) -> bool {
        true
    }

    fn add(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError> {
        if specs.is_empty() {
            return Ok(());
        }
        self.record(Invocation::Add {
            dir: dir.to_path_buf(),
            specs: to_strings(specs),
        })
    }

    fn add_dev(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError> {
        if specs.is_empty() {
            return Ok(());
        }
        self.record(Invocation::AddDev {
            dir: dir.to_path_buf(),
            specs: to_strings(specs),
        })
    }

    fn install(&self, dir: &Path) -> Result<(), RuntimeError> {
        self.record(Invocation::Install {
            dir: dir.to_path_buf(),
        })
    }

    fn create_next_app(&self, dir: &Path) -> Result<(), RuntimeError> {
        self.record(Invocation::CreateNextApp {
            dir: dir.to_path_buf(),
        })?;
        std::fs::create_dir_all(dir)?;
        Ok(())
    }
}
