//! Static dependency bundles and the per-name override table.
//!
//! Bundles are whitespace-separated package-manager identifiers, exactly as
//! they would be passed to `pnpm add`.

use crate::descriptor::{Archetype, NamedUnit};
use crate::manifest::{ExportMap, ExportTarget, ScriptMap};
use std::collections::BTreeMap;

pub const NEXT_BUNDLE: &str = "@packages/queue@workspace:^ @packages/database@workspace:^ \
     drizzle-orm zustand axios class-transformer class-validator pg";

pub const NEST_BUNDLE: &str = "@nestjs/core @nestjs/common @nestjs/config \
     @nestjs/platform-express reflect-metadata rxjs nestjs-zod express zod";

pub const NEST_WORKSPACE_BUNDLE: &str = "@packages/queue@workspace:^ \
     @packages/database@workspace:^ @packages/auth-common@workspace:^ drizzle-orm @types/express";

pub const NODE_BUNDLE: &str = "@faker-js/faker bullmq @packages/queue@workspace:^ \
     @packages/database@workspace:^ drizzle-orm";

/// Build tooling shared by runnable apps and the compiled packages.
pub const TOOLING_DEV_BUNDLE: &str =
    "@packages/eslint@workspace:^ @packages/tsconfig@workspace:^ tsup @swc/core nodemon";

pub const AUTH_BUNDLE: &str = "@nestjs/passport @nestjs/jwt passport passport-jwt \
     passport-local passport-github passport-google-oauth20 ioredis @nestjs-modules/ioredis \
     bcrypt cookie-parser";

pub const AUTH_DEV_BUNDLE: &str = "@types/bcrypt @types/cookie-parser";

/// Partial manifest layered on top of the archetype defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOverride {
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
    pub scripts: Option<ScriptMap>,
    pub main: Option<String>,
    pub exports: Option<ExportMap>,
    pub types: Option<String>,
    pub publish_config: Option<BTreeMap<String, String>>,
}

/// `build`, `check-types`, `dev`, `lint` and `start`, with `start`
/// running the given entry point.
pub fn common_scripts(entry_point: &str) -> ScriptMap {
    let start = format!("node {}", entry_point.trim_end_matches(".js"));
    [
        ("build", "tsup --clean".to_owned()),
        ("check-types", "tsc --noEmit".to_owned()),
        ("dev", "tsup --watch & nodemon".to_owned()),
        ("lint", "eslint .".to_owned()),
        ("start", start),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v))
    .collect()
}

fn single_export(key: &str, target: ExportTarget) -> ExportMap {
    ExportMap::from([(key.to_owned(), target)])
}

fn source_typed_exports() -> ExportMap {
    single_export(".", ExportTarget::typed("./src/index.ts", "./dist/index.js"))
}

/// Look up the override layer for a unit name.
///
/// `auth` only carries a layer for Nest apps. Every other entry applies to
/// whatever archetype reuses the name.
pub fn override_for(
    named: NamedUnit,
    archetype: Archetype,
    entry_point: &str,
) -> Option<ManifestOverride> {
    match named {
        NamedUnit::Tsconfig => Some(ManifestOverride {
            dev_dependencies: vec!["@tsconfig/node20"],
            main: Some("base.json".to_owned()),
            exports: Some(single_export("./base.json", ExportTarget::path("./base.json"))),
            publish_config: Some(BTreeMap::from([(
                "access".to_owned(),
                "public".to_owned(),
            )])),
            ..ManifestOverride::default()
        }),
        NamedUnit::Eslint => Some(ManifestOverride {
            dev_dependencies: vec!["@eslint/js eslint globals typescript-eslint"],
            main: Some("index.js".to_owned()),
            exports: Some(single_export(".", ExportTarget::path("./index.js"))),
            ..ManifestOverride::default()
        }),
        NamedUnit::Database => {
            let mut scripts = common_scripts(entry_point);
            for (name, cmd) in [
                ("drop", "drizzle-kit drop"),
                ("generate", "drizzle-kit generate"),
                ("migrate", "drizzle-kit migrate"),
                ("studio", "drizzle-kit studio"),
                ("seed", "tsx scripts/seed.ts"),
            ] {
                scripts.insert(name.to_owned(), cmd.to_owned());
            }
            Some(ManifestOverride {
                dependencies: vec![
                    "@nestjs/common @nestjs/config @nestjs/core @nestjs/platform-express \
                     dotenv drizzle-orm pg reflect-metadata rxjs zod",
                ],
                dev_dependencies: vec![
                    TOOLING_DEV_BUNDLE,
                    "@types/node @types/pg drizzle-kit",
                ],
                scripts: Some(scripts),
                exports: Some(single_export(
                    ".",
                    ExportTarget::typed("./dist/index.d.ts", "./dist/index.js"),
                )),
                main: None,
                types: Some("dist/index.d.ts".to_owned()),
                publish_config: None,
            })
        }
        NamedUnit::Queue => Some(ManifestOverride {
            dependencies: vec!["bullmq ioredis"],
            dev_dependencies: vec![TOOLING_DEV_BUNDLE],
            scripts: Some(common_scripts(entry_point)),
            exports: Some(source_typed_exports()),
            ..ManifestOverride::default()
        }),
        NamedUnit::AuthCommon => Some(ManifestOverride {
            dependencies: vec![
                "@nestjs/common @nestjs/config @nestjs/core @nestjs/platform-express \
                 @nestjs/passport dotenv reflect-metadata rxjs zod jsonwebtoken @nestjs/jwt \
                 passport-jwt passport-local nestjs-zod",
            ],
            dev_dependencies: vec![
                TOOLING_DEV_BUNDLE,
                "@types/passport-jwt @types/passport-local",
            ],
            scripts: Some(common_scripts(entry_point)),
            exports: Some(source_typed_exports()),
            ..ManifestOverride::default()
        }),
        NamedUnit::Auth if archetype == Archetype::Nest => Some(ManifestOverride {
            dependencies: vec![AUTH_BUNDLE],
            dev_dependencies: vec![AUTH_DEV_BUNDLE],
            ..ManifestOverride::default()
        }),
        NamedUnit::Auth | NamedUnit::Other => None,
    }
}
