//! Manifest composition.
//!
//! A manifest is built in layers, each able to add or replace entries but
//! never to remove a base key:
//!
//! 1. base record (fixed keys, empty maps)
//! 2. entry point derived from the archetype (`main`, `start`, nodemon `exec`)
//! 3. kind defaults (package exports, app scripts)
//! 4. archetype dependency bundles
//! 5. name override (scripts, main, exports, types and publishConfig
//!    replaced; dependencies merged for packages and the Nest `auth` app)
//!
//! Composition is pure: the same descriptor always yields the same manifest.

use crate::dependency::DependencyPlan;
use crate::descriptor::{Archetype, NamedUnit, UnitDescriptor, UnitKind};
use crate::manifest::{ExportMap, ExportTarget, Manifest, ScriptMap};
use crate::overrides::{
    common_scripts, override_for, ManifestOverride, NEST_BUNDLE, NEST_WORKSPACE_BUNDLE,
    NEXT_BUNDLE, NODE_BUNDLE, TOOLING_DEV_BUNDLE,
};
use crate::types::PackageName;

/// Compose the `package.json` for a unit.
pub fn compose(descriptor: &UnitDescriptor) -> Manifest {
    let entry_point = descriptor.archetype.entry_point();
    let package_name = PackageName::scoped(descriptor.kind.scope(), &descriptor.name);
    let mut manifest = Manifest::base(&package_name, entry_point);

    match descriptor.kind {
        UnitKind::Package => {
            manifest.scripts = ScriptMap::new();
            manifest.exports =
                ExportMap::from([(".".to_owned(), ExportTarget::default_only("./dist/index.js"))]);
        }
        UnitKind::App => {
            manifest.scripts = common_scripts(entry_point);
        }
    }

    let layer = override_for(descriptor.named(), descriptor.archetype, entry_point);
    if let Some(layer) = &layer {
        apply_override(&mut manifest, layer);
    }

    let plan = plan_with(descriptor, layer.as_ref());
    for spec in &plan.dependencies {
        manifest
            .dependencies
            .insert(spec.name.clone(), spec.manifest_range().to_owned());
    }
    for spec in &plan.dev_dependencies {
        manifest
            .dev_dependencies
            .insert(spec.name.clone(), spec.manifest_range().to_owned());
    }

    manifest
}

/// Dependencies the composer merges into the manifest, in install order:
/// archetype bundles first, then the name override.
pub fn dependency_plan(descriptor: &UnitDescriptor) -> DependencyPlan {
    let layer = override_for(
        descriptor.named(),
        descriptor.archetype,
        descriptor.archetype.entry_point(),
    );
    plan_with(descriptor, layer.as_ref())
}

fn plan_with(descriptor: &UnitDescriptor, layer: Option<&ManifestOverride>) -> DependencyPlan {
    let mut plan = DependencyPlan::default();

    match descriptor.archetype {
        Archetype::Next => plan.add(NEXT_BUNDLE),
        Archetype::Nest => {
            plan.add(NEST_BUNDLE);
            plan.add(NEST_WORKSPACE_BUNDLE);
            plan.add_dev(TOOLING_DEV_BUNDLE);
        }
        Archetype::Node => {
            plan.add(NODE_BUNDLE);
            plan.add_dev(TOOLING_DEV_BUNDLE);
        }
        Archetype::PackageLib => {}
    }

    // Name layers install extra dependencies for packages only; the one
    // app layer is `auth` on Nest.
    let installs_layer =
        descriptor.kind == UnitKind::Package || descriptor.named() == NamedUnit::Auth;
    if let Some(layer) = layer.filter(|_| installs_layer) {
        for bundle in &layer.dependencies {
            plan.add(bundle);
        }
        for bundle in &layer.dev_dependencies {
            plan.add_dev(bundle);
        }
    }

    plan
}

fn apply_override(manifest: &mut Manifest, layer: &ManifestOverride) {
    if let Some(scripts) = layer.scripts.as_ref().filter(|s| !s.is_empty()) {
        manifest.scripts.clone_from(scripts);
    }
    if let Some(main) = &layer.main {
        manifest.main.clone_from(main);
    }
    if let Some(exports) = &layer.exports {
        manifest.exports.clone_from(exports);
    }
    if let Some(types) = &layer.types {
        manifest.types.clone_from(types);
    }
    if let Some(publish) = &layer.publish_config {
        manifest.publish_config.clone_from(publish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::AUTH_BUNDLE;
    use crate::types::UnitName;
    use std::collections::BTreeSet;

    fn unit(name: &str, archetype: Archetype) -> UnitDescriptor {
        UnitDescriptor::from_archetype(UnitName::parse(name).unwrap(), archetype)
    }

    /// True when `plan` installs every identifier of `bundle`.
    fn plan_includes(plan: &DependencyPlan, bundle: &str) -> bool {
        let all: Vec<_> = plan
            .dependencies
            .iter()
            .chain(&plan.dev_dependencies)
            .map(ToString::to_string)
            .collect();
        bundle.split_whitespace().all(|id| all.iter().any(|s| s == id))
    }

    fn json_keys(manifest: &Manifest) -> BTreeSet<String> {
        let value = serde_json::to_value(manifest).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn unknown_package_has_no_scripts_and_default_export() {
        for name in ["billing", "utils", "shared-types"] {
            let manifest = compose(&unit(name, Archetype::PackageLib));
            assert!(manifest.scripts.is_empty(), "{name}");
            assert_eq!(manifest.exports.len(), 1);
            assert_eq!(
                manifest.exports["."],
                ExportTarget::default_only("./dist/index.js")
            );
            assert_eq!(manifest.name, format!("@packages/{name}"));
        }
    }

    #[test]
    fn nest_entry_point_drives_start_and_exec() {
        for name in ["api", "auth", "gateway"] {
            let manifest = compose(&unit(name, Archetype::Nest));
            assert_eq!(manifest.scripts["start"], "node dist/main");
            assert_eq!(manifest.nodemon_config.exec, "node dist/main.js");
            assert_eq!(manifest.main, "dist/main.js");
        }
    }

    #[test]
    fn other_archetypes_run_dist_index() {
        for archetype in [Archetype::Next, Archetype::Node] {
            let manifest = compose(&unit("web", archetype));
            assert_eq!(manifest.scripts["start"], "node dist/index");
            assert_eq!(manifest.nodemon_config.exec, "node dist/index.js");
        }
        let package = compose(&unit("queue", Archetype::PackageLib));
        assert_eq!(package.scripts["start"], "node dist/index");
        assert_eq!(package.nodemon_config.exec, "node dist/index.js");
    }

    #[test]
    fn start_and_exec_always_agree() {
        for archetype in Archetype::ALL {
            for name in ["api", "auth", "database", "queue", "auth-common", "misc"] {
                let manifest = compose(&unit(name, archetype));
                let exec = &manifest.nodemon_config.exec;
                if let Some(start) = manifest.scripts.get("start") {
                    assert_eq!(format!("{start}.js"), *exec, "{name} ({archetype})");
                }
            }
        }
    }

    #[test]
    fn app_gets_common_scripts() {
        let manifest = compose(&unit("worker", Archetype::Node));
        let keys: Vec<_> = manifest.scripts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["build", "check-types", "dev", "lint", "start"]);
        assert!(manifest.exports.is_empty());
    }

    #[test]
    fn auth_nest_app_is_superset_of_nest_bundle() {
        let auth = dependency_plan(&unit("auth", Archetype::Nest));
        let generic = dependency_plan(&unit("api", Archetype::Nest));
        assert!(plan_includes(&auth, NEST_BUNDLE));
        assert!(plan_includes(&auth, NEST_WORKSPACE_BUNDLE));
        assert!(plan_includes(&auth, AUTH_BUNDLE));
        assert!(!plan_includes(&generic, AUTH_BUNDLE));
        for spec in &generic.dependencies {
            assert!(auth.dependencies.contains(spec), "missing {spec}");
        }

        let manifest = compose(&unit("auth", Archetype::Nest));
        for id in ["passport-google-oauth20", "passport-github", "cookie-parser", "@nestjs/core"] {
            assert!(manifest.dependencies.contains_key(id), "missing {id}");
        }
        assert!(manifest.dev_dependencies.contains_key("@types/bcrypt"));
    }

    #[test]
    fn database_package_has_drizzle_scripts() {
        let manifest = compose(&unit("database", Archetype::PackageLib));
        for script in ["generate", "migrate", "studio", "drop", "seed"] {
            assert!(manifest.scripts.contains_key(script), "missing {script}");
        }
        assert_eq!(manifest.scripts["migrate"], "drizzle-kit migrate");
        assert_eq!(manifest.types, "dist/index.d.ts");
        assert_eq!(
            manifest.exports["."],
            ExportTarget::typed("./dist/index.d.ts", "./dist/index.js")
        );
        assert!(manifest.dependencies.contains_key("drizzle-orm"));
        assert!(manifest.dev_dependencies.contains_key("drizzle-kit"));
    }

    #[test]
    fn compose_is_deterministic() {
        for archetype in Archetype::ALL {
            for name in ["auth", "database", "front", "tsconfig"] {
                let d = unit(name, archetype);
                let a = compose(&d).to_json_pretty().unwrap();
                let b = compose(&d).to_json_pretty().unwrap();
                assert_eq!(a.as_bytes(), b.as_bytes());
            }
        }
    }

    #[test]
    fn overrides_never_drop_base_keys() {
        let base_keys = json_keys(&compose(&unit("plain", Archetype::PackageLib)));
        for name in ["tsconfig", "eslint", "database", "queue", "auth-common", "auth"] {
            for archetype in Archetype::ALL {
                let keys = json_keys(&compose(&unit(name, archetype)));
                assert!(keys.is_superset(&base_keys), "{name} ({archetype})");
            }
        }
    }

    #[test]
    fn package_name_layer_adds_dependencies() {
        let manifest = compose(&unit("queue", Archetype::PackageLib));
        assert!(manifest.dependencies.contains_key("bullmq"));
        assert!(manifest.dependencies.contains_key("ioredis"));
        assert!(manifest.dev_dependencies.contains_key("tsup"));
    }

    #[test]
    fn apps_named_like_packages_get_only_archetype_bundles() {
        let queue = compose(&unit("queue", Archetype::Node));
        assert!(queue.dependencies.contains_key("@faker-js/faker"));
        assert_eq!(queue.dependencies["@packages/database"], "workspace:^");
        assert!(!queue.dependencies.contains_key("ioredis"));
        // The layer still shapes scripts and exports.
        assert_eq!(queue.scripts["start"], "node dist/index");

        let database = dependency_plan(&unit("database", Archetype::Nest));
        for id in ["dotenv", "pg", "@types/pg", "drizzle-kit"] {
            assert!(!plan_includes(&database, id), "{id}");
        }
        assert_eq!(
            database,
            dependency_plan(&unit("api", Archetype::Nest)),
        );

        let auth_common = dependency_plan(&unit("auth-common", Archetype::Next));
        assert_eq!(auth_common, dependency_plan(&unit("front", Archetype::Next)));
    }

    #[test]
    fn config_packages_point_main_at_their_export() {
        let eslint = compose(&unit("eslint", Archetype::PackageLib));
        assert_eq!(eslint.main, "index.js");
        assert_eq!(eslint.exports["."], ExportTarget::path("./index.js"));

        let tsconfig = compose(&unit("tsconfig", Archetype::PackageLib));
        assert_eq!(tsconfig.main, "base.json");

        let queue = compose(&unit("queue", Archetype::PackageLib));
        assert_eq!(queue.main, "dist/index.js");
    }

    #[test]
    fn tsconfig_package_replaces_exports() {
        let manifest = compose(&unit("tsconfig", Archetype::PackageLib));
        assert_eq!(
            manifest.exports["./base.json"],
            ExportTarget::path("./base.json")
        );
        assert!(!manifest.exports.contains_key("."));
        assert_eq!(manifest.publish_config["access"], "public");
        assert!(manifest.scripts.is_empty());
        assert_eq!(manifest.dev_dependencies["@tsconfig/node20"], "latest");
    }

    #[test]
    fn next_app_has_no_dev_tooling() {
        let plan = dependency_plan(&unit("front", Archetype::Next));
        assert!(plan.dev_dependencies.is_empty());
        assert!(plan_includes(&plan, NEXT_BUNDLE));
    }
}
