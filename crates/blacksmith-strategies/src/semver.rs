//! SemVer bump policy

use tracing::{debug, instrument};

use blacksmith_core::error::{Result, VersionError};
use blacksmith_core::types::BumpLevel;

use crate::types::VersionComponents;

/// Semantic Versioning bump policy
///
/// A pure function of (current version, level, optional explicit target):
/// `major`, `minor` and `patch` increment one component and reset the lower
/// ones, dropping any pre-release or build suffix; `full` replaces the
/// version wholesale with a validated explicit target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }

    /// Parse a version string into components
    pub fn parse(&self, version: &str) -> Result<VersionComponents> {
        Ok(version.parse::<VersionComponents>()?)
    }

    /// Format version components into a string
    pub fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    /// Increment one component of `current`
    ///
    /// `Full` has no implicit target and is rejected here; use
    /// [`SemVerStrategy::next_version`] with an explicit target instead.
    pub fn bump(&self, current: &VersionComponents, level: BumpLevel) -> Result<VersionComponents> {
        let (major, minor, patch) = current.triple();
        let next = match level {
            BumpLevel::Major => VersionComponents::new(major + 1, 0, 0),
            BumpLevel::Minor => VersionComponents::new(major, minor + 1, 0),
            BumpLevel::Patch => VersionComponents::new(major, minor, patch + 1),
            BumpLevel::Full => {
                return Err(VersionError::InvalidBumpTarget(String::new()).into());
            }
        };
        Ok(next)
    }

    /// Compute the version string that follows `current`
    ///
    /// For `Full`, the current version is not inspected: the target replaces
    /// it unconditionally once it parses.
    #[instrument(skip(self))]
    pub fn next_version(
        &self,
        current: &str,
        level: BumpLevel,
        target: Option<&str>,
    ) -> Result<String> {
        if level == BumpLevel::Full {
            let target = target.unwrap_or_default();
            target
                .parse::<VersionComponents>()
                .map_err(|_| VersionError::InvalidBumpTarget(target.to_string()))?;
            debug!(from = current, to = target, "full version replacement");
            return Ok(target.to_string());
        }

        let components = self.parse(current)?;
        let next = self.format(&self.bump(&components, level)?);
        debug!(from = current, to = %next, %level, "computed next version");
        Ok(next)
    }
}
