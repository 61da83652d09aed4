//! Upload configuration and results

use std::path::{Path, PathBuf};

use serde::Serialize;

use blacksmith_core::config::DEFAULT_PACKAGE_DIR;

use crate::error::Result;

/// Transport and lookup settings shared by all uploaders
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Proxy URL; `None` disables proxying entirely
    pub proxy: Option<String>,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Locate and validate the artifact but skip the request
    pub dry_run: bool,
    /// Directory searched when no artifact path is given
    pub package_dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: format!("blacksmith/{}", env!("CARGO_PKG_VERSION")),
            dry_run: false,
            package_dir: PathBuf::from(DEFAULT_PACKAGE_DIR),
        }
    }
}

impl UploadConfig {
    /// Create default upload settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Route requests through `proxy`
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable or disable dry-run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the directory searched for artifacts
    pub fn with_package_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.package_dir = dir.into();
        self
    }

    /// Build the blocking HTTP client these settings describe
    pub fn http_client(&self) -> Result<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(&self.user_agent);
        builder = match &self.proxy {
            Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy)?),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }
}

/// Outcome of a push
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// Endpoint the artifact was (or would have been) sent to
    pub url: String,
    /// Artifact that was uploaded
    pub artifact: PathBuf,
    /// HTTP status of the response; `None` for a dry run
    pub status: Option<u16>,
    /// Whether the request was skipped
    pub dry_run: bool,
}

impl UploadResult {
    /// A completed upload
    pub fn uploaded(url: impl Into<String>, artifact: &Path, status: u16) -> Self {
        Self {
            url: url.into(),
            artifact: artifact.to_path_buf(),
            status: Some(status),
            dry_run: false,
        }
    }

    /// An upload skipped by dry-run
    pub fn dry_run(url: impl Into<String>, artifact: &Path) -> Self {
        Self {
            url: url.into(),
            artifact: artifact.to_path_buf(),
            status: None,
            dry_run: true,
        }
    }
}
