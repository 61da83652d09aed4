//! Store error types

use std::path::PathBuf;

use thiserror::Error;

/// Upload-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Explicit artifact path does not exist
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),

    /// Nothing in the package directory matches the naming pattern
    #[error("No artifact matching '{pattern}' found in {dir}")]
    NoMatchingArtifact { dir: PathBuf, pattern: String },

    /// Remote rejected the upload
    #[error("Error uploading to {url} [HTTP {status}]: {body}")]
    UploadFailed {
        url: String,
        status: u16,
        body: String,
    },

    /// Artifact naming pattern is not a valid glob
    #[error("Invalid artifact pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Credentials could not be resolved
    #[error(transparent)]
    Credentials(#[from] blacksmith_core::BlacksmithError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
