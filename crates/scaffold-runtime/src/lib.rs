//! Package-manager collaborator for turbo-scaffold.
//!
//! Installing dependencies and bootstrapping a Next.js app are delegated to
//! an external package manager. This crate wraps those invocations behind
//! the `PackageManager` trait, with a process-spawning `pnpm` backend and a
//! recording mock, and checks that the required tools are installed.

pub mod command;
pub mod mock;
pub mod package_manager;
pub mod prereq;

pub use command::CommandPackageManager;
pub use mock::{Invocation, MockPackageManager};
pub use package_manager::{select_package_manager, PackageManager, SUPPORTED_PACKAGE_MANAGERS};
pub use prereq::{check_prereqs, format_missing, MissingPrereq};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("package manager I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("package manager '{0}' is not supported (expected: pnpm, mock)")]
    Unsupported(String),
    #[error("package manager '{0}' was not found on PATH")]
    Unavailable(String),
    #[error("package manager command failed: `{command}` exited with {status}{detail}")]
    CommandFailed {
        command: String,
        status: String,
        detail: String,
    },
}
