//! Blacksmith Git - Git operations for module releases
//!
//! Repository discovery goes through `git2`; anything that writes to the
//! repository or talks to a remote shells out to the `git` binary in the
//! repository's working directory.

mod commits;
mod remote;
mod repository;
mod tagger;
mod tags;
mod template;

pub use repository::{GitRepo, Result};
pub use tagger::RepositoryTagger;
pub use template::VersionTemplate;
