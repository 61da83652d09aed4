//! Locating the built artifact

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::Pattern;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Resolve the file to upload
///
/// An explicit path must exist. Otherwise `package_dir` is searched for files
/// whose name matches `pattern` and the most recently modified one wins.
pub fn locate_artifact(explicit: Option<&Path>, package_dir: &Path, pattern: &str) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(StoreError::NotFound(path.to_path_buf())),
        None => find_newest(package_dir, pattern),
    }
}

/// Most recently modified file in `dir` whose name matches `pattern`
pub fn find_newest(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let matcher = Pattern::new(pattern)?;
    let no_match = || StoreError::NoMatchingArtifact {
        dir: dir.to_path_buf(),
        pattern: pattern.to_string(),
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(no_match()),
        Err(e) => return Err(e.into()),
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !matcher.matches(name) {
            continue;
        }

        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified()?;
        let path = entry.path();

        let replace = match &newest {
            None => true,
            Some((best_time, best_path)) => {
                modified > *best_time || (modified == *best_time && path > *best_path)
            }
        };
        if replace {
            newest = Some((modified, path));
        }
    }

    let (_, path) = newest.ok_or_else(no_match)?;
    debug!(artifact = %path.display(), pattern, "located artifact");
    Ok(path)
}
