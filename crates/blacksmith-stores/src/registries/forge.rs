//! Puppet Forge integration
//!
//! ## Authentication
//!
//! An API key is sent as a bearer token. Without one, the username and
//! password are sent as HTTP basic credentials.

use std::path::Path;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use tracing::instrument;

use blacksmith_core::credentials::FORGE_DEFAULT_URL;
use blacksmith_core::types::PackageInfo;
use blacksmith_core::{CredentialResolver, Credentials};

use super::{basic_auth, send_checked};
use crate::error::Result;
use crate::traits::ArtifactUploader;
use crate::types::{UploadConfig, UploadResult};

/// Puppet Forge release uploader
pub struct ForgeRegistry {
    credentials: Credentials,
    config: UploadConfig,
    client: Client,
}

impl ForgeRegistry {
    /// Create a client from already-resolved credentials
    pub fn new(credentials: Credentials, config: UploadConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            credentials,
            config,
            client,
        })
    }

    /// Resolve Forge credentials and create a client
    pub fn from_resolver(resolver: &CredentialResolver, config: UploadConfig) -> Result<Self> {
        Self::new(resolver.resolve()?, config)
    }

    fn base_url(&self) -> &str {
        self.credentials
            .url
            .as_deref()
            .unwrap_or(FORGE_DEFAULT_URL)
            .trim_end_matches('/')
    }

    fn authorization(&self) -> Option<String> {
        if let Some(key) = &self.credentials.api_key {
            return Some(format!("Bearer {}", key));
        }
        match (&self.credentials.username, &self.credentials.password) {
            (Some(username), Some(password)) => Some(basic_auth(username, password)),
            _ => None,
        }
    }

    /// Build the upload request without sending it
    pub fn request(&self, artifact: &Path) -> Result<RequestBuilder> {
        let form = Form::new().file("file", artifact)?;
        let mut request = self.client.post(self.endpoint()).multipart(form);
        if let Some(auth) = self.authorization() {
            request = request.header(AUTHORIZATION, auth);
        }
        Ok(request)
    }
}

impl ArtifactUploader for ForgeRegistry {
    fn name(&self) -> &str {
        "Puppet Forge"
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/releases", self.base_url())
    }

    fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Any version of the module: `build` runs before the release bump, so
    /// the tarball may still carry the previous version
    fn artifact_pattern(&self, package: &PackageInfo) -> String {
        format!("{}-*.tar.gz", glob::Pattern::escape(&package.name))
    }

    #[instrument(skip_all, fields(artifact = %artifact.display()))]
    fn upload(&self, artifact: &Path, _package: &PackageInfo) -> Result<UploadResult> {
        let url = self.endpoint();
        let response = send_checked(self.request(artifact)?, &url)?;
        Ok(UploadResult::uploaded(url, artifact, response.status().as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::registries::testing::one_shot_server;
    use tempfile::TempDir;

    fn package() -> PackageInfo {
        PackageInfo::new("acme-ntp", "1.0.1", "metadata.json")
    }

    fn credentials(url: &str) -> Credentials {
        Credentials {
            url: Some(url.to_string()),
            username: Some("acme".to_string()),
            password: Some("secret".to_string()),
            ..Credentials::default()
        }
    }

    fn module_with_tarball() -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        std::fs::create_dir(&pkg).unwrap();
        let tarball = pkg.join("acme-ntp-1.0.1.tar.gz");
        std::fs::write(&tarball, b"tarball").unwrap();
        (temp, tarball)
    }

    #[test]
    fn test_request_uses_basic_auth() {
        let (_temp, tarball) = module_with_tarball();
        let forge = ForgeRegistry::new(credentials("https://forge.example.com/"), UploadConfig::new()).unwrap();

        let request = forge.request(&tarball).unwrap().build().unwrap();
        assert_eq!(request.url().as_str(), "https://forge.example.com/v3/releases");
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Basic YWNtZTpzZWNyZXQ="
        );
    }

    #[test]
    fn test_request_prefers_api_key() {
        let (_temp, tarball) = module_with_tarball();
        let mut creds = credentials(FORGE_DEFAULT_URL);
        creds.api_key = Some("forge-token".to_string());
        let forge = ForgeRegistry::new(creds, UploadConfig::new()).unwrap();

        let request = forge.request(&tarball).unwrap().build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://forgeapi.puppet.com/v3/releases"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer forge-token"
        );
    }

    #[test]
    fn test_pattern_matches_module_name() {
        let (temp, _tarball) = module_with_tarball();
        let other_module = temp.path().join("pkg/acme-apache-9.9.9.tar.gz");
        std::fs::write(&other_module, b"other").unwrap();
        let previous = temp.path().join("pkg/acme-ntp-1.0.0.tar.gz");
        std::fs::write(&previous, b"previous").unwrap();

        let config = UploadConfig::new()
            .with_package_dir(temp.path().join("pkg"))
            .with_dry_run(true);
        let forge = ForgeRegistry::new(credentials("http://127.0.0.1:1"), config).unwrap();

        assert_eq!(forge.artifact_pattern(&package()), "acme-ntp-*.tar.gz");
        let result = forge.push(None, &package()).unwrap();
        assert!(result.dry_run);
        assert_ne!(result.artifact, other_module);
        assert!(result
            .artifact
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("acme-ntp-"));
    }

    #[test]
    fn test_newest_tarball_wins_over_version() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        std::fs::create_dir(&pkg).unwrap();
        let older = pkg.join("acme-ntp-1.0.1.tar.gz");
        let newer = pkg.join("acme-ntp-1.0.0.tar.gz");
        std::fs::write(&older, b"older").unwrap();
        std::fs::write(&newer, b"newer").unwrap();
        let past = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        std::fs::File::options()
            .write(true)
            .open(&older)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let config = UploadConfig::new().with_package_dir(pkg).with_dry_run(true);
        let forge = ForgeRegistry::new(credentials("http://127.0.0.1:1"), config).unwrap();

        // the manifest already names 1.0.1, but the newest build is picked
        let result = forge.push(None, &package()).unwrap();
        assert_eq!(result.artifact, newer);
    }

    #[test]
    fn test_missing_artifact_fails_before_network() {
        let temp = TempDir::new().unwrap();
        let config = UploadConfig::new().with_package_dir(temp.path().join("pkg"));
        // nothing listens on port 1; reaching the network would be an Http error
        let forge = ForgeRegistry::new(credentials("http://127.0.0.1:1"), config).unwrap();

        let result = forge.push(None, &package());
        assert!(matches!(result, Err(StoreError::NoMatchingArtifact { .. })));

        let result = forge.push(Some(&temp.path().join("nope.tar.gz")), &package());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_upload_success() {
        let (_temp, tarball) = module_with_tarball();
        let (url, server) = one_shot_server("201 Created", "{}");
        let forge = ForgeRegistry::new(credentials(&url), UploadConfig::new()).unwrap();

        let result = forge.push(Some(&tarball), &package()).unwrap();
        assert_eq!(result.status, Some(201));
        assert_eq!(result.url, format!("{}/v3/releases", url));

        let request = server.join().unwrap().to_lowercase();
        assert!(request.starts_with("post /v3/releases"));
        assert!(request.contains("user-agent: blacksmith/"));
        assert!(request.contains("name=\"file\"; filename=\"acme-ntp-1.0.1.tar.gz\""));
    }

    #[test]
    fn test_upload_rejected() {
        let (_temp, tarball) = module_with_tarball();
        let (url, server) = one_shot_server("400 Bad Request", "version already exists");
        let forge = ForgeRegistry::new(credentials(&url), UploadConfig::new()).unwrap();

        let result = forge.push(Some(&tarball), &package());
        server.join().unwrap();

        match result {
            Err(StoreError::UploadFailed { url: failed_url, status, body }) => {
                assert_eq!(failed_url, format!("{}/v3/releases", url));
                assert_eq!(status, 400);
                assert_eq!(body, "version already exists");
            }
            other => panic!("expected UploadFailed, got {:?}", other),
        }
    }
}
