//! Error types for Blacksmith

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BlacksmithError
pub type Result<T> = std::result::Result<T, BlacksmithError>;

/// Main error type for Blacksmith operations
#[derive(Debug, Error)]
pub enum BlacksmithError {
    /// Configuration and credential errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version arithmetic errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Manifest errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// No usable username/password (or API key) after merging every source
    #[error("{}", render_missing_credentials(.service, .env_vars, .files, .example))]
    MissingCredentials {
        service: String,
        env_vars: Vec<String>,
        files: Vec<PathBuf>,
        example: String,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// The configured remote is not defined in the repository
    #[error("Remote '{0}' is not configured")]
    RemoteNotFound(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// A git command exited unsuccessfully
    #[error("git {command} failed: {output}")]
    CommandFailed { command: String, output: String },

    /// The git binary could not be started
    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Current version is not MAJOR.MINOR.PATCH
    #[error("Invalid version format '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidFormat(String),

    /// Replacement version for a full bump is missing or malformed
    #[error("Invalid bump target '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidBumpTarget(String),

    /// Unknown bump level name
    #[error("Unknown bump level '{0}': expected major, minor, patch or full")]
    InvalidBumpLevel(String),

    /// Malformed dependency version requirement
    #[error("Invalid version requirement '{requirement}': {reason}")]
    InvalidRequirement { requirement: String, reason: String },
}

/// Manifest (metadata.json) errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("Manifest not found at {0}")]
    NotFound(PathBuf),

    /// Manifest exists but could not be parsed
    #[error("Failed to parse manifest {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Manifest could not be written back
    #[error("Failed to write manifest {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    /// Dependency is not listed in the manifest
    #[error("Module '{0}' is not listed in the manifest dependencies")]
    UnknownModule(String),
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// External build tool failed
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },
}

fn render_missing_credentials(
    service: &str,
    env_vars: &[String],
    files: &[PathBuf],
    example: &str,
) -> String {
    let files = files
        .iter()
        .map(|f| format!("'{}'", f.display()))
        .collect::<Vec<_>>()
        .join(" or ");

    format!(
        "Could not find {} credentials!\n\n\
         Please set the environment variables\n{}\n\n\
         or create the file {}\n\
         with content similar to:\n\n{}",
        service,
        env_vars.join("\n"),
        files,
        example
    )
}
