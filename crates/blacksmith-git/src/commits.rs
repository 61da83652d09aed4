//! Commit operations

use std::path::Path;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Stage `path` and commit it alone with `message`
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn commit_path(&self, path: &Path, message: &str) -> Result<()> {
        let relative = path.strip_prefix(self.path()).unwrap_or(path);
        let relative = relative.to_string_lossy();
        self.run(&["add", "--", relative.as_ref()])?;
        self.run(&["commit", "-m", message, "--", relative.as_ref()])?;
        info!(message, "committed");
        Ok(())
    }

    /// Subject line of the HEAD commit
    pub fn head_message(&self) -> Result<Option<String>> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.summary().map(|s| s.to_string()))
    }
}
