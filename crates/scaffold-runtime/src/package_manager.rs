use crate::RuntimeError;
use scaffold_schema::DependencySpec;
use std::path::Path;

pub const SUPPORTED_PACKAGE_MANAGERS: &[&str] = &["pnpm", "mock"];

/// External tool that installs dependencies into a unit directory.
///
/// Every call runs to completion before returning. Implementations must
/// treat an empty spec list as a no-op.
pub trait PackageManager {
    fn name(&self) -> &str;

    fn available(&self) -> bool;

    /// `<pm> add <specs>` in `dir`.
    fn add(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError>;

    /// `<pm> add -D <specs>` in `dir`.
    fn add_dev(&self, dir: &Path, specs: &[DependencySpec]) -> Result<(), RuntimeError>;

    /// `<pm> install` in `dir`.
    fn install(&self, dir: &Path) -> Result<(), RuntimeError>;

    /// Bootstrap a Next.js app into `dir` with the upstream generator.
    fn create_next_app(&self, dir: &Path) -> Result<(), RuntimeError>;
}

/// Pick a package manager by name. `verbose` streams the tool's own output
/// to the terminal instead of capturing it.
pub fn select_package_manager(
    name: &str,
    verbose: bool,
) -> Result<Box<dyn PackageManager>, RuntimeError> {
    match name {
        "pnpm" => Ok(Box::new(
            crate::command::CommandPackageManager::new("pnpm").verbose(verbose),
        )),
        "mock" => Ok(Box::new(crate::mock::MockPackageManager::new())),
        other => Err(RuntimeError::Unsupported(other.to_owned())),
    }
}
