//! Core types for Blacksmith

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Which part of the version a bump touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    /// MAJOR+1, minor and patch reset
    Major,
    /// MINOR+1, patch reset
    Minor,
    /// PATCH+1
    Patch,
    /// Replace the whole version with an explicit one
    Full,
}

impl BumpLevel {
    /// Returns the string representation of the bump level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Full => "full",
        }
    }
}

impl Default for BumpLevel {
    fn default() -> Self {
        Self::Patch
    }
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BumpLevel {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            "full" => Ok(Self::Full),
            _ => Err(VersionError::InvalidBumpLevel(s.to_string())),
        }
    }
}

/// Package information handed from the manifest to uploaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Full module name (e.g. `puppetlabs-stdlib`)
    pub name: String,
    /// Current version
    pub version: String,
    /// Path to the package manifest
    pub manifest_path: std::path::PathBuf,
}

impl PackageInfo {
    /// Create new package info
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        manifest_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            manifest_path: manifest_path.into(),
        }
    }

    /// Name of the package tarball a module build produces
    pub fn tarball_name(&self) -> String {
        format!("{}-{}.tar.gz", self.name, self.version)
    }
}
