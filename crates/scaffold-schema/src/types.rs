//! Newtype wrappers for the string identifiers a unit carries.
//!
//! Both newtypes serialize as plain strings. `UnitName` can only be built
//! through [`UnitName::parse`], so a value of that type is always a valid
//! directory name and package-name suffix.

use crate::SchemaError;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// npm refuses package names longer than this, scope included.
const MAX_NAME_LEN: usize = 214;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl AsRef<std::path::Path> for $name {
            fn as_ref(&self) -> &std::path::Path {
                std::path::Path::new(&self.0)
            }
        }
    };
}

string_newtype!(
    /// Validated unit name: the on-disk directory and the unscoped package name.
    UnitName
);

string_newtype!(
    /// Scoped package name written to the manifest, e.g. `@apps/api`.
    PackageName
);

impl UnitName {
    /// Validate a raw unit name.
    ///
    /// Accepted names are non-empty, lowercase ASCII letters, digits, `-`,
    /// `_` and `.`, and must not start with `.` or `_`.
    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidName {
            name: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if raw.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if raw.len() > MAX_NAME_LEN {
            return Err(invalid("longer than 214 characters"));
        }
        if raw.starts_with('.') || raw.starts_with('_') {
            return Err(invalid("must not start with '.' or '_'"));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
        {
            return Err(invalid(&format!("unsupported character '{c}'")));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Database name derived from a monorepo name: dashes become underscores
    /// and a `_dev` suffix is added.
    pub fn database_name(&self) -> String {
        format!("{}_dev", self.0.replace('-', "_"))
    }
}

impl PackageName {
    pub fn scoped(scope: &str, unit: &UnitName) -> Self {
        Self(format!("@{scope}/{unit}"))
    }
}
