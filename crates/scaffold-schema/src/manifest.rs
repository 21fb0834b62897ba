use crate::types::PackageName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ScriptMap = BTreeMap<String, String>;
pub type DependencyMap = BTreeMap<String, String>;
pub type ExportMap = BTreeMap<String, ExportTarget>;

/// A generated `package.json`.
///
/// Field order is the serialized key order. Every field is always
/// serialized, empty or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub private: bool,
    #[serde(rename = "type")]
    pub module_type: String,
    pub version: String,
    pub main: String,
    pub types: String,
    pub exports: ExportMap,
    pub publish_config: BTreeMap<String, String>,
    pub scripts: ScriptMap,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
    pub nodemon_config: NodemonConfig,
}

/// Value of one `exports` entry: a bare path or a condition object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExportTarget {
    Path(String),
    Conditions(ExportConditions),
}

/// Conditional export. Node resolves conditions in key order, so `types`
/// is declared (and serialized) before `default`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExportConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    pub default: String,
}

impl ExportTarget {
    pub fn path(p: &str) -> Self {
        Self::Path(p.to_owned())
    }

    pub fn default_only(default: &str) -> Self {
        Self::Conditions(ExportConditions {
            types: None,
            default: default.to_owned(),
        })
    }

    pub fn typed(types: &str, default: &str) -> Self {
        Self::Conditions(ExportConditions {
            types: Some(types.to_owned()),
            default: default.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodemonConfig {
    pub watch: Vec<String>,
    pub ext: String,
    pub exec: String,
}

impl Manifest {
    /// Base record: fixed metadata, every map empty.
    pub fn base(name: &PackageName, entry_point: &str) -> Self {
        Self {
            name: name.to_string(),
            private: true,
            module_type: "module".to_owned(),
            version: "1.0.0".to_owned(),
            main: entry_point.to_owned(),
            types: String::new(),
            exports: ExportMap::new(),
            publish_config: BTreeMap::new(),
            scripts: ScriptMap::new(),
            dependencies: DependencyMap::new(),
            dev_dependencies: DependencyMap::new(),
            nodemon_config: NodemonConfig {
                watch: vec!["dist".to_owned()],
                ext: "js".to_owned(),
                exec: format!("node {entry_point}"),
            },
        }
    }

    /// Two-space pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
