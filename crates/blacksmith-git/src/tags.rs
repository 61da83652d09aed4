//! Tag operations

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use blacksmith_core::error::GitError;

impl GitRepo {
    /// Check whether `refs/tags/<name>` exists
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        let tag_ref = format!("refs/tags/{}", name);
        match self.repo.find_reference(&tag_ref) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Create an annotated tag at HEAD, refusing to move an existing one
    #[instrument(skip(self))]
    pub fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tag_exists(name)? {
            return Err(GitError::TagExists(name.to_string()));
        }

        self.run(&["tag", "-a", name, "-m", message])?;
        info!(tag = name, "created tag");
        Ok(())
    }
}
