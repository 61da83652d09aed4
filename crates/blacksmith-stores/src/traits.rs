//! Uploader trait

use std::path::Path;

use tracing::{info, instrument};

use blacksmith_core::types::PackageInfo;

use crate::artifacts::locate_artifact;
use crate::error::Result;
use crate::types::{UploadConfig, UploadResult};

/// A remote repository that accepts built module tarballs
pub trait ArtifactUploader {
    /// Display name of the target
    fn name(&self) -> &str;

    /// URL the artifact is posted to
    fn endpoint(&self) -> String;

    /// Transport and lookup settings
    fn config(&self) -> &UploadConfig;

    /// File-name glob used when no artifact path is given
    fn artifact_pattern(&self, package: &PackageInfo) -> String;

    /// Send `artifact` in a single request
    fn upload(&self, artifact: &Path, package: &PackageInfo) -> Result<UploadResult>;

    /// Locate the artifact and upload it
    ///
    /// Lookup failures are reported before any network I/O. With dry-run
    /// enabled the located artifact is returned without contacting the remote.
    #[instrument(skip_all, fields(uploader = self.name(), package = %package.name, version = %package.version))]
    fn push(&self, artifact: Option<&Path>, package: &PackageInfo) -> Result<UploadResult> {
        let pattern = self.artifact_pattern(package);
        let path = locate_artifact(artifact, &self.config().package_dir, &pattern)?;

        if self.config().dry_run {
            info!(artifact = %path.display(), url = %self.endpoint(), "dry run, skipping upload");
            return Ok(UploadResult::dry_run(self.endpoint(), &path));
        }

        self.upload(&path, package)
    }
}
