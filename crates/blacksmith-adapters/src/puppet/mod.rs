//! Puppet module adapter

mod metadata;

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument};

use blacksmith_core::config::{DEFAULT_MANIFEST, DEFAULT_PACKAGE_DIR};
use blacksmith_core::error::{Result, WorkflowError};

use crate::traits::PackageAdapter;
pub use metadata::{normalize_module_name, Dependency, Metadata};

/// External tool that produces the module tarball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    /// Puppet Development Kit
    Pdk,
    /// Legacy `puppet module build`
    Puppet,
}

impl BuildTool {
    /// Pick the first tool `available` reports, preferring PDK
    pub fn select(available: impl Fn(&str) -> bool) -> Option<Self> {
        [Self::Pdk, Self::Puppet]
            .into_iter()
            .find(|tool| available(tool.program()))
    }

    /// Look the tools up on PATH
    pub fn detect() -> Option<Self> {
        Self::select(|program| which::which(program).is_ok())
    }

    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            Self::Pdk => "pdk",
            Self::Puppet => "puppet",
        }
    }

    /// Arguments for a non-interactive build
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Pdk => &["build", "--force"],
            Self::Puppet => &["module", "build"],
        }
    }

    /// Command line as shown to the user
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program(), self.args().join(" "))
    }
}

/// Puppet module adapter
#[derive(Debug, Clone)]
pub struct PuppetAdapter {
    manifest: PathBuf,
    package_dir: PathBuf,
}

impl PuppetAdapter {
    /// Create a new adapter using `metadata.json` and `pkg/`
    pub fn new() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            package_dir: PathBuf::from(DEFAULT_PACKAGE_DIR),
        }
    }

    /// Override the manifest location (relative to the project or absolute)
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Override the build output directory
    pub fn with_package_dir(mut self, package_dir: impl Into<PathBuf>) -> Self {
        self.package_dir = package_dir.into();
        self
    }

    /// Get the metadata.json path
    pub fn manifest_path(&self, path: &Path) -> PathBuf {
        path.join(&self.manifest)
    }

    /// Get the build output directory
    pub fn package_dir(&self, path: &Path) -> PathBuf {
        path.join(&self.package_dir)
    }

    /// Load the manifest of the project at `path`
    pub fn load(&self, path: &Path) -> Result<Metadata> {
        Metadata::load(&self.manifest_path(path))
    }

    /// Write the manifest of the project at `path`
    pub fn save(&self, path: &Path, metadata: &Metadata) -> Result<()> {
        metadata.save(&self.manifest_path(path))
    }
}

impl Default for PuppetAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageAdapter for PuppetAdapter {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn build(&self, path: &Path) -> Result<()> {
        let tool = BuildTool::detect().ok_or_else(|| WorkflowError::CommandFailed {
            command: "build".to_string(),
            reason: "neither `pdk` nor `puppet` was found on PATH".to_string(),
        })?;

        info!(command = %tool.command_line(), "building module");
        let output = Command::new(tool.program())
            .args(tool.args())
            .current_dir(path)
            .output()
            .map_err(|e| WorkflowError::CommandFailed {
                command: tool.command_line(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let reason = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(WorkflowError::CommandFailed {
                command: tool.command_line(),
                reason: reason.trim().to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn clean(&self, path: &Path) -> Result<()> {
        let package_dir = self.package_dir(path);
        if package_dir.exists() {
            std::fs::remove_dir_all(&package_dir)?;
            debug!(dir = %package_dir.display(), "removed package directory");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn module_dir(version: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("metadata.json"),
            format!(r#"{{"name": "acme-ntp", "version": "{}"}}"#, version),
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_load_and_save() {
        let adapter = PuppetAdapter::new();
        let temp = module_dir("1.0.0");

        let mut metadata = adapter.load(temp.path()).unwrap();
        assert_eq!(metadata.name(), "acme-ntp");
        metadata.set_version("2.0.0");
        adapter.save(temp.path(), &metadata).unwrap();

        assert_eq!(adapter.load(temp.path()).unwrap().version(), "2.0.0");
    }

    #[test]
    fn test_custom_manifest_location() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("module")).unwrap();
        std::fs::write(
            temp.path().join("module/metadata.json"),
            r#"{"name": "acme-ntp", "version": "0.1.0"}"#,
        )
        .unwrap();

        let adapter = PuppetAdapter::new().with_manifest("module/metadata.json");
        assert_eq!(adapter.load(temp.path()).unwrap().version(), "0.1.0");
        assert_eq!(adapter.package_dir(temp.path()), temp.path().join("pkg"));
    }

    #[test]
    fn test_clean_removes_package_dir() {
        let adapter = PuppetAdapter::new();
        let temp = module_dir("1.0.0");
        let pkg = temp.path().join("pkg");
        std::fs::create_dir(&pkg).unwrap();
        std::fs::write(pkg.join("acme-ntp-1.0.0.tar.gz"), b"tarball").unwrap();

        adapter.clean(temp.path()).unwrap();
        assert!(!pkg.exists());

        // cleaning twice is fine
        adapter.clean(temp.path()).unwrap();
    }

    #[test]
    fn test_build_tool_prefers_pdk() {
        assert_eq!(BuildTool::select(|_| true), Some(BuildTool::Pdk));
        assert_eq!(
            BuildTool::select(|program| program == "puppet"),
            Some(BuildTool::Puppet)
        );
        assert_eq!(BuildTool::select(|_| false), None);
    }

    #[test]
    fn test_build_tool_command_line() {
        assert_eq!(BuildTool::Pdk.command_line(), "pdk build --force");
        assert_eq!(BuildTool::Puppet.command_line(), "puppet module build");
    }
}
