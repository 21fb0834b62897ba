use serde::Serialize;
use std::fmt;

/// Range recorded in the manifest for a dependency given without one.
pub const DEFAULT_RANGE: &str = "latest";

/// One dependency identifier as handed to the package manager.
///
/// The raw form is `name` or `name@range`; scoped names keep their leading
/// `@`, so `@packages/queue@workspace:^` splits into `@packages/queue` and
/// `workspace:^`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencySpec {
    pub name: String,
    pub range: Option<String>,
}

impl DependencySpec {
    pub fn parse(raw: &str) -> Self {
        let (scope_prefix, rest) = match raw.strip_prefix('@') {
            Some(rest) => ("@", rest),
            None => ("", raw),
        };
        match rest.split_once('@') {
            Some((name, range)) if !range.is_empty() => Self {
                name: format!("{scope_prefix}{name}"),
                range: Some(range.to_owned()),
            },
            _ => Self {
                name: raw.trim_end_matches('@').to_owned(),
                range: None,
            },
        }
    }

    /// Range written into the manifest.
    pub fn manifest_range(&self) -> &str {
        self.range.as_deref().unwrap_or(DEFAULT_RANGE)
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}@{range}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Ordered, de-duplicated runtime and dev dependencies for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyPlan {
    pub dependencies: Vec<DependencySpec>,
    pub dev_dependencies: Vec<DependencySpec>,
}

impl DependencyPlan {
    /// Append whitespace-separated identifiers. A later spec for an already
    /// listed name replaces the earlier one in place.
    pub fn add(&mut self, bundle: &str) {
        merge_into(&mut self.dependencies, bundle);
    }

    pub fn add_dev(&mut self, bundle: &str) {
        merge_into(&mut self.dev_dependencies, bundle);
    }
}

fn merge_into(list: &mut Vec<DependencySpec>, bundle: &str) {
    for spec in bundle.split_whitespace().map(DependencySpec::parse) {
        if let Some(existing) = list.iter_mut().find(|s| s.name == spec.name) {
            *existing = spec;
        } else {
            list.push(spec);
        }
    }
}
