use crate::types::UnitName;
use crate::SchemaError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Where a unit lives in the monorepo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    App,
    Package,
}

impl UnitKind {
    /// Package scope, which doubles as the top-level directory name.
    pub fn scope(self) -> &'static str {
        match self {
            Self::App => "apps",
            Self::Package => "packages",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::App => "app",
            Self::Package => "package",
        })
    }
}

/// Runtime flavor of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Next,
    Node,
    Nest,
    PackageLib,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [Self::Next, Self::Node, Self::Nest, Self::PackageLib];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Node => "node",
            Self::Nest => "nest",
            Self::PackageLib => "package-lib",
        }
    }

    /// The only kind this archetype may be scaffolded as.
    pub fn kind(self) -> UnitKind {
        match self {
            Self::PackageLib => UnitKind::Package,
            Self::Next | Self::Node | Self::Nest => UnitKind::App,
        }
    }

    /// Compiled file the unit runs from, relative to the unit directory.
    pub fn entry_point(self) -> &'static str {
        match self {
            Self::Nest => "dist/main.js",
            Self::Next | Self::Node | Self::PackageLib => "dist/index.js",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "node" => Ok(Self::Node),
            "nest" => Ok(Self::Nest),
            "package-lib" | "package" => Ok(Self::PackageLib),
            other => Err(SchemaError::UnknownArchetype(other.to_owned())),
        }
    }
}

/// Unit names that carry their own override layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedUnit {
    Tsconfig,
    Eslint,
    Database,
    Queue,
    AuthCommon,
    Auth,
    /// Any name without an override layer.
    Other,
}

impl NamedUnit {
    pub fn classify(name: &str) -> Self {
        match name {
            "tsconfig" => Self::Tsconfig,
            "eslint" => Self::Eslint,
            "database" => Self::Database,
            "queue" => Self::Queue,
            "auth-common" => Self::AuthCommon,
            "auth" => Self::Auth,
            _ => Self::Other,
        }
    }
}

/// Input to manifest composition: one app or package to scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDescriptor {
    pub name: UnitName,
    pub kind: UnitKind,
    pub archetype: Archetype,
}

impl UnitDescriptor {
    /// Build a descriptor, rejecting a kind that contradicts the archetype.
    pub fn new(name: UnitName, kind: UnitKind, archetype: Archetype) -> Result<Self, SchemaError> {
        if archetype.kind() != kind {
            return Err(SchemaError::KindMismatch { kind, archetype });
        }
        Ok(Self {
            name,
            kind,
            archetype,
        })
    }

    /// Build a descriptor whose kind is implied by the archetype.
    pub fn from_archetype(name: UnitName, archetype: Archetype) -> Self {
        Self {
            name,
            kind: archetype.kind(),
            archetype,
        }
    }

    pub fn named(&self) -> NamedUnit {
        NamedUnit::classify(&self.name)
    }
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.kind.scope(), self.name, self.archetype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> UnitName {
        UnitName::parse(raw).unwrap()
    }

    #[test]
    fn archetype_parses_known_values() {
        assert_eq!("next".parse::<Archetype>().unwrap(), Archetype::Next);
        assert_eq!("nest".parse::<Archetype>().unwrap(), Archetype::Nest);
        assert_eq!("node".parse::<Archetype>().unwrap(), Archetype::Node);
        assert_eq!(
            "package-lib".parse::<Archetype>().unwrap(),
            Archetype::PackageLib
        );
        assert_eq!("package".parse::<Archetype>().unwrap(), Archetype::PackageLib);
    }

    #[test]
    fn archetype_rejects_unknown() {
        let err = "django".parse::<Archetype>().unwrap_err();
        assert!(err.to_string().contains("django"));
    }

    #[test]
    fn entry_point_per_archetype() {
        assert_eq!(Archetype::Nest.entry_point(), "dist/main.js");
        for a in [Archetype::Next, Archetype::Node, Archetype::PackageLib] {
            assert_eq!(a.entry_point(), "dist/index.js");
        }
    }

    #[test]
    fn new_rejects_kind_mismatch() {
        assert!(UnitDescriptor::new(name("api"), UnitKind::Package, Archetype::Nest).is_err());
        assert!(UnitDescriptor::new(name("db"), UnitKind::App, Archetype::PackageLib).is_err());
        assert!(UnitDescriptor::new(name("api"), UnitKind::App, Archetype::Nest).is_ok());
    }

    #[test]
    fn from_archetype_derives_kind() {
        let d = UnitDescriptor::from_archetype(name("queue"), Archetype::PackageLib);
        assert_eq!(d.kind, UnitKind::Package);
        assert_eq!(d.to_string(), "packages/queue (package-lib)");
    }

    #[test]
    fn classify_names() {
        assert_eq!(NamedUnit::classify("auth-common"), NamedUnit::AuthCommon);
        assert_eq!(NamedUnit::classify("database"), NamedUnit::Database);
        assert_eq!(NamedUnit::classify("billing"), NamedUnit::Other);
    }
}
