//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_COMMIT_MESSAGE, DEFAULT_MANIFEST, DEFAULT_PACKAGE_DIR, DEFAULT_TAG_PATTERN,
};

/// Main configuration for Blacksmith
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest path, relative to the project directory
    pub manifest: PathBuf,

    /// Build output directory, relative to the project directory
    pub package_dir: PathBuf,

    /// Whether release chains build and upload the package
    pub build: bool,

    /// Git configuration
    pub git: GitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            package_dir: PathBuf::from(DEFAULT_PACKAGE_DIR),
            build: true,
            git: GitConfig::default(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Tag name template, must contain `{version}` once
    pub tag_pattern: String,

    /// Commit message template, must contain `{version}` once
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            tag_pattern: DEFAULT_TAG_PATTERN.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}
