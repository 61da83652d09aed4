//! Credential resolution for the upload targets
//!
//! Credentials are merged from three layers, lowest precedence first:
//! built-in defaults, a YAML credentials file (project file, else home file),
//! and `BLACKSMITH_*` environment variables. The project directory, home
//! directory and environment are all passed in so resolution never reads
//! process globals on its own.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{ConfigError, Result};

/// Public module registry
pub const FORGE_DEFAULT_URL: &str = "https://forgeapi.puppet.com";

/// Placeholder private repository
pub const NEXUS_DEFAULT_URL: &str = "http://nexus.instance.com";

/// Default private repository name
pub const NEXUS_DEFAULT_REPOSITORY: &str = "internal";

/// Which upload target the credentials are for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialTarget {
    /// Public registry (Puppet Forge)
    Forge,
    /// Private artifact repository (Nexus)
    Nexus,
}

impl CredentialTarget {
    /// Human-readable service name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Forge => "Puppet Forge",
            Self::Nexus => "Nexus",
        }
    }

    /// Credentials file name, looked up in the project and home directories
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Forge => ".puppetforge.yml",
            Self::Nexus => ".nexus.yml",
        }
    }

    /// Environment variables and the credential key each one sets
    pub fn env_vars(&self) -> &'static [(&'static str, CredentialKey)] {
        match self {
            Self::Forge => &[
                ("BLACKSMITH_FORGE_URL", CredentialKey::Url),
                ("BLACKSMITH_FORGE_USERNAME", CredentialKey::Username),
                ("BLACKSMITH_FORGE_PASSWORD", CredentialKey::Password),
                ("BLACKSMITH_FORGE_API_KEY", CredentialKey::ApiKey),
            ],
            Self::Nexus => &[
                ("BLACKSMITH_NEXUS_URL", CredentialKey::Url),
                ("BLACKSMITH_NEXUS_USERNAME", CredentialKey::Username),
                ("BLACKSMITH_NEXUS_PASSWORD", CredentialKey::Password),
                ("BLACKSMITH_NEXUS_REPOSITORY", CredentialKey::Repository),
                ("BLACKSMITH_NEXUS_GROUP_ID", CredentialKey::Group),
                ("BLACKSMITH_NEXUS_ARTIFACT_ID", CredentialKey::Artifact),
            ],
        }
    }

    /// Built-in defaults, the lowest precedence layer
    pub fn defaults(&self) -> Credentials {
        match self {
            Self::Forge => Credentials {
                url: Some(FORGE_DEFAULT_URL.to_string()),
                ..Credentials::default()
            },
            Self::Nexus => Credentials {
                url: Some(NEXUS_DEFAULT_URL.to_string()),
                repository: Some(NEXUS_DEFAULT_REPOSITORY.to_string()),
                ..Credentials::default()
            },
        }
    }

    /// Sample credentials file shown when resolution fails
    pub fn example(&self) -> &'static str {
        match self {
            Self::Forge => {
                "---\nurl: https://forgeapi.puppet.com\nusername: myuser\napi_key: myapikey\n"
            }
            Self::Nexus => {
                "---\nurl: http://nexus.instance.com\nrepository: internal\n\
                 group: com.ontotext.puppet\nartifact: base\nusername: myuser\n\
                 password: mypassword\n"
            }
        }
    }

    /// Whether the merged credentials can authenticate against this target
    fn is_usable(&self, credentials: &Credentials) -> bool {
        let has_login = credentials.username.is_some() && credentials.password.is_some();
        match self {
            Self::Forge => has_login || credentials.api_key.is_some(),
            Self::Nexus => has_login,
        }
    }
}

/// Individual credential fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    Url,
    Repository,
    Group,
    Artifact,
    Username,
    Password,
    ApiKey,
}

/// Merged credentials for one upload target
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Base URL of the service
    pub url: Option<String>,
    /// Repository name (Nexus)
    pub repository: Option<String>,
    /// Maven group id (Nexus)
    pub group: Option<String>,
    /// Maven artifact id (Nexus)
    pub artifact: Option<String>,
    /// Login name
    pub username: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// API key (Forge)
    pub api_key: Option<String>,
}

impl Credentials {
    /// Overlay `other` on top of `self`; set fields in `other` win
    pub fn merge(self, other: Credentials) -> Credentials {
        Credentials {
            url: other.url.or(self.url),
            repository: other.repository.or(self.repository),
            group: other.group.or(self.group),
            artifact: other.artifact.or(self.artifact),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            api_key: other.api_key.or(self.api_key),
        }
    }

    fn set(&mut self, key: CredentialKey, value: String) {
        let slot = match key {
            CredentialKey::Url => &mut self.url,
            CredentialKey::Repository => &mut self.repository,
            CredentialKey::Group => &mut self.group,
            CredentialKey::Artifact => &mut self.artifact,
            CredentialKey::Username => &mut self.username,
            CredentialKey::Password => &mut self.password,
            CredentialKey::ApiKey => &mut self.api_key,
        };
        *slot = Some(value);
    }

    /// Drop empty strings so they count as unset
    fn normalized(self) -> Credentials {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Credentials {
            url: keep(self.url),
            repository: keep(self.repository),
            group: keep(self.group),
            artifact: keep(self.artifact),
            username: keep(self.username),
            password: keep(self.password),
            api_key: keep(self.api_key),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("repository", &self.repository)
            .field("group", &self.group)
            .field("artifact", &self.artifact)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

/// Layered credential lookup for one upload target
pub struct CredentialResolver {
    target: CredentialTarget,
    project_dir: PathBuf,
    home_dir: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl CredentialResolver {
    /// Create a resolver with no home directory and an empty environment
    pub fn new(target: CredentialTarget, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            target,
            project_dir: project_dir.into(),
            home_dir: None,
            env: HashMap::new(),
        }
    }

    /// Create a resolver over the user's home directory and process environment
    pub fn from_environment(target: CredentialTarget, project_dir: impl Into<PathBuf>) -> Self {
        let mut resolver = Self::new(target, project_dir).with_env(std::env::vars());
        resolver.home_dir = dirs::home_dir();
        resolver
    }

    /// Set the home directory searched for the user-level file
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    /// Set the environment snapshot
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// The target these credentials are for
    pub fn target(&self) -> CredentialTarget {
        self.target
    }

    /// Credentials file candidates, in lookup order
    pub fn candidate_files(&self) -> Vec<PathBuf> {
        let name = self.target.file_name();
        let mut files = vec![self.project_dir.join(name)];
        if let Some(home) = &self.home_dir {
            files.push(home.join(name));
        }
        files
    }

    /// Merge defaults, file and environment into usable credentials
    #[instrument(skip(self), fields(target = self.target.display_name()))]
    pub fn resolve(&self) -> Result<Credentials> {
        let file = self.from_file()?;
        let env = self.from_env();

        let credentials = self
            .target
            .defaults()
            .merge(file)
            .merge(env)
            .normalized();

        if let Some(url) = &credentials.url {
            url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: "url".to_string(),
                message: format!("'{}' is not a valid URL: {}", url, e),
            })?;
        }

        if !self.target.is_usable(&credentials) {
            debug!("no usable credentials after merging all sources");
            return Err(self.missing_credentials().into());
        }

        debug!(
            url = ?credentials.url,
            username = ?credentials.username,
            api_key = credentials.api_key.is_some(),
            "credentials resolved"
        );
        Ok(credentials)
    }

    /// Read the first credentials file that exists
    fn from_file(&self) -> Result<Credentials> {
        let Some(path) = self.candidate_files().into_iter().find(|p| p.exists()) else {
            debug!("no credentials file found");
            return Ok(Credentials::default());
        };

        debug!(path = %path.display(), "reading credentials file");
        load_credentials_file(&path)
    }

    /// Collect every set `BLACKSMITH_*` variable for this target
    fn from_env(&self) -> Credentials {
        let mut credentials = Credentials::default();
        for (var, key) in self.target.env_vars() {
            if let Some(value) = self.env.get(*var).filter(|v| !v.is_empty()) {
                debug!(var, "credential set from environment");
                credentials.set(*key, value.clone());
            }
        }
        credentials
    }

    fn missing_credentials(&self) -> ConfigError {
        ConfigError::MissingCredentials {
            service: self.target.display_name().to_string(),
            env_vars: self
                .target
                .env_vars()
                .iter()
                .map(|(var, _)| var.to_string())
                .collect(),
            files: self.candidate_files(),
            example: self.target.example().to_string(),
        }
    }
}

/// Parse a YAML credentials file; an empty file yields no credentials
pub fn load_credentials_file(path: &Path) -> Result<Credentials> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    if content.trim().is_empty() || content.trim() == "---" {
        return Ok(Credentials::default());
    }

    serde_yaml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("{}: {}", path.display(), e)).into()
    })
}
