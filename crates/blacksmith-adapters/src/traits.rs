//! Package adapter traits

use std::path::Path;

use blacksmith_core::error::Result;

/// Build steps for a module checked out at `path`
pub trait PackageAdapter: Send + Sync {
    /// Build the package
    fn build(&self, path: &Path) -> Result<()>;

    /// Clean build artifacts
    fn clean(&self, path: &Path) -> Result<()>;
}
