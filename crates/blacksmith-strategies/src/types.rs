//! Version strategy types

use serde::{Deserialize, Serialize};

use blacksmith_core::error::VersionError;

/// Version components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComponents {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Pre-release identifier
    pub prerelease: Option<String>,
    /// Build metadata
    pub build: Option<String>,
}

impl VersionComponents {
    /// Create new version components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Set prerelease
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    /// Set build metadata
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// The bare `(major, minor, patch)` triple
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Convert to string representation
    pub fn to_version_string(&self) -> String {
        let mut v = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            v.push('-');
            v.push_str(pre);
        }

        if let Some(build) = &self.build {
            v.push('+');
            v.push_str(build);
        }

        v
    }

    /// Compare as semantic versions
    pub fn semver_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.to_semver(), other.to_semver()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.triple().cmp(&other.triple()),
        }
    }

    fn to_semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.to_version_string()).ok()
    }
}

impl std::fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_version_string())
    }
}

impl std::str::FromStr for VersionComponents {
    type Err = VersionError;

    /// Parse `MAJOR.MINOR.PATCH[-pre][+build]`; anything else is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version =
            semver::Version::parse(s).map_err(|_| VersionError::InvalidFormat(s.to_string()))?;

        Ok(Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: if version.pre.is_empty() {
                None
            } else {
                Some(version.pre.to_string())
            },
            build: if version.build.is_empty() {
                None
            } else {
                Some(version.build.to_string())
            },
        })
    }
}
