//! Remote operations

use std::time::Instant;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use blacksmith_core::error::GitError;

impl GitRepo {
    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().any(|r| r == name))
    }

    /// Push the current branch, then all tags, to `remote`
    #[instrument(skip(self))]
    pub fn push_with_tags(&self, remote: &str) -> Result<()> {
        let start = Instant::now();
        if !self.has_remote(remote)? {
            return Err(GitError::RemoteNotFound(remote.to_string()));
        }
        let branch = self.current_branch()?.ok_or_else(|| GitError::CommandFailed {
            command: format!("push {}", remote),
            output: "HEAD is not on a branch".to_string(),
        })?;

        self.run(&["push", remote, branch.as_str()])?;
        self.run(&["push", remote, "--tags"])?;

        info!(
            remote,
            branch = %branch,
            duration_ms = start.elapsed().as_millis(),
            "pushed branch and tags"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::testing::seed_repo;
    use blacksmith_core::error::GitError;
    use git2::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_has_remote() {
        let (_temp, repo) = seed_repo();
        assert!(!repo.has_remote("origin").unwrap());

        repo.inner()
            .remote("origin", "https://example.com/acme/ntp.git")
            .unwrap();
        assert!(repo.has_remote("origin").unwrap());
    }

    #[test]
    fn test_push_branch_and_tags() {
        let (_temp, repo) = seed_repo();
        let remote_dir = TempDir::new().unwrap();
        let bare = Repository::init_bare(remote_dir.path()).unwrap();
        repo.inner()
            .remote("origin", &remote_dir.path().to_string_lossy())
            .unwrap();

        repo.create_tag("1.0.0", "Version 1.0.0").unwrap();
        repo.push_with_tags("origin").unwrap();

        let branch = repo.current_branch().unwrap().unwrap();
        assert!(bare
            .find_reference(&format!("refs/heads/{}", branch))
            .is_ok());
        assert!(bare.find_reference("refs/tags/1.0.0").is_ok());
    }

    #[test]
    fn test_push_to_missing_remote() {
        let (_temp, repo) = seed_repo();
        let result = repo.push_with_tags("nowhere");
        assert!(matches!(result, Err(GitError::RemoteNotFound(name)) if name == "nowhere"));
    }
}
