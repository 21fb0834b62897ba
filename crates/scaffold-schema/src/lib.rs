//! Unit descriptors, package manifests, and manifest composition for turbo-scaffold.
//!
//! This crate is the pure layer of the scaffolder: validated unit names
//! (`UnitName`), the `UnitDescriptor` a scaffold run is driven by, the
//! `Manifest` (`package.json`) model, the static dependency bundles and
//! per-name override table, and [`compose`], which layers them into a
//! manifest. Nothing here touches the filesystem or spawns processes.

pub mod compose;
pub mod dependency;
pub mod descriptor;
pub mod manifest;
pub mod overrides;
pub mod types;

pub use compose::{compose, dependency_plan};
pub use dependency::{DependencyPlan, DependencySpec};
pub use descriptor::{Archetype, NamedUnit, UnitDescriptor, UnitKind};
pub use manifest::{ExportConditions, ExportTarget, Manifest, NodemonConfig};
pub use overrides::ManifestOverride;
pub use types::{PackageName, UnitName};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid unit name: name must not be empty")]
    EmptyName,
    #[error("invalid unit name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
    #[error("invalid unit archetype '{0}' (expected: next, node, nest, package-lib)")]
    UnknownArchetype(String),
    #[error("invalid unit: a {archetype} unit cannot be scaffolded as a {kind}")]
    KindMismatch { kind: UnitKind, archetype: Archetype },
}
