//! Release-level git steps: commit the manifest, tag, push

use std::path::Path;

use tracing::instrument;

use blacksmith_core::config::GitConfig;

use crate::repository::{GitRepo, Result};
use crate::template::VersionTemplate;

/// Commits, tags and pushes a module release
pub struct RepositoryTagger {
    repo: GitRepo,
    tag_pattern: VersionTemplate,
    commit_message: VersionTemplate,
    remote: String,
}

impl RepositoryTagger {
    /// Bind an open repository to the git settings
    pub fn new(repo: GitRepo, config: &GitConfig) -> blacksmith_core::Result<Self> {
        Ok(Self {
            repo,
            tag_pattern: VersionTemplate::new("git.tag_pattern", config.tag_pattern.as_str())?,
            commit_message: VersionTemplate::new(
                "git.commit_message",
                config.commit_message.as_str(),
            )?,
            remote: config.remote.clone(),
        })
    }

    /// Find the repository containing `start` and bind it to the git settings
    pub fn discover(start: &Path, config: &GitConfig) -> blacksmith_core::Result<Self> {
        let repo = GitRepo::discover(start)?;
        Self::new(repo, config)
    }

    /// The underlying repository
    pub fn repo(&self) -> &GitRepo {
        &self.repo
    }

    /// Remote that `push` targets
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Tag name for a version
    pub fn tag_name(&self, version: &str) -> String {
        self.tag_pattern.render(version)
    }

    /// Tag HEAD for `version` and return the tag name
    #[instrument(skip(self))]
    pub fn tag(&self, version: &str) -> Result<String> {
        let name = self.tag_name(version);
        self.repo.create_tag(&name, &format!("Version {}", version))?;
        Ok(name)
    }

    /// Commit the manifest with the version bump message
    #[instrument(skip(self, manifest))]
    pub fn commit_manifest(&self, manifest: &Path, version: &str) -> Result<()> {
        self.repo
            .commit_path(manifest, &self.commit_message.render(version))
    }

    /// Push the current branch and tags to the configured remote
    pub fn push(&self) -> Result<()> {
        self.repo.push_with_tags(&self.remote)
    }
}
