//! Scaffolding engine for turbo-scaffold.
//!
//! This crate ties the pure manifest composer to the filesystem and the
//! package manager: it probes the working directory once into a
//! `WorkspaceContext`, lays out `apps/` and `packages/`, copies template
//! directories, writes composed manifests atomically, and drives the
//! `Scaffolder` through monorepo initialization and unit addition.

pub mod config;
pub mod context;
pub mod engine;
pub mod layout;
pub mod templates;

pub use config::ScaffoldConfig;
pub use context::{WorkspaceContext, MONOREPO_MARKER};
pub use engine::{InitReport, ScaffoldOptions, Scaffolder, UnitPlan, UnitReport};
pub use layout::WorkspaceLayout;
pub use templates::{remove_git_dir, TemplateSource};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid unit: {0}")]
    Schema(#[from] scaffold_schema::SchemaError),
    #[error("{0}")]
    Runtime(#[from] scaffold_runtime::RuntimeError),
    #[error("workspace error: monorepo is not initialized in {0} (run `turbo-scaffold <name>` and cd into it first)")]
    NotInitialized(PathBuf),
    #[error("workspace error: refusing to overwrite {0} (pass --force)")]
    AlreadyExists(PathBuf),
    #[error("template error: template directory not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("template error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
