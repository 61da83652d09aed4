//! Project context shared by commands

use std::path::{Path, PathBuf};

use tracing::debug;

use blacksmith_adapters::{Metadata, PuppetAdapter};
use blacksmith_core::config::{load_config_or_default, Config};
use blacksmith_core::{CredentialResolver, CredentialTarget};
use blacksmith_git::RepositoryTagger;
use blacksmith_stores::registries::{ForgeRegistry, NexusRepository};
use blacksmith_stores::{ArtifactUploader, StoreError, UploadConfig};

/// Environment variables consulted for an HTTP proxy, in order
const PROXY_VARS: [&str; 2] = ["http_proxy", "HTTP_PROXY"];

/// The module being released: its directory, settings and manifest
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
    config_path: Option<PathBuf>,
    adapter: PuppetAdapter,
}

impl Project {
    /// Load settings for the module in `directory` (default: the current
    /// directory), optionally overriding the manifest path
    pub fn load(directory: Option<&Path>, manifest: Option<&Path>) -> anyhow::Result<Self> {
        let root = match directory {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };

        let (mut config, config_path) = load_config_or_default(&root)?;
        if let Some(manifest) = manifest {
            config.manifest = manifest.to_path_buf();
        }

        let adapter = PuppetAdapter::new()
            .with_manifest(config.manifest.clone())
            .with_package_dir(config.package_dir.clone());

        debug!(
            root = %root.display(),
            config = ?config_path,
            manifest = %config.manifest.display(),
            "loaded project"
        );

        Ok(Self {
            root,
            config,
            config_path,
            adapter,
        })
    }

    /// Module directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Config file the settings came from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn adapter(&self) -> &PuppetAdapter {
        &self.adapter
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.adapter.manifest_path(&self.root)
    }

    pub fn package_dir(&self) -> PathBuf {
        self.adapter.package_dir(&self.root)
    }

    /// Read the manifest fresh from disk
    pub fn metadata(&self) -> blacksmith_core::Result<Metadata> {
        self.adapter.load(&self.root)
    }

    pub fn save_metadata(&self, metadata: &Metadata) -> blacksmith_core::Result<()> {
        self.adapter.save(&self.root, metadata)
    }

    /// Git steps for the repository containing the module
    pub fn tagger(&self) -> blacksmith_core::Result<RepositoryTagger> {
        RepositoryTagger::discover(&self.root, &self.config.git)
    }

    /// Upload settings rooted at this project
    pub fn upload_config(&self, dry_run: bool) -> UploadConfig {
        let config = UploadConfig::new()
            .with_package_dir(self.package_dir())
            .with_dry_run(dry_run);

        match proxy_from_env(|name| std::env::var(name).ok()) {
            Some(proxy) => config.with_proxy(proxy),
            None => config,
        }
    }

    /// Uploader for `target`, with credentials resolved from the project
    /// directory, the home directory and the environment
    pub fn uploader(
        &self,
        target: CredentialTarget,
        dry_run: bool,
    ) -> Result<Box<dyn ArtifactUploader>, StoreError> {
        let resolver = CredentialResolver::from_environment(target, &self.root);
        let config = self.upload_config(dry_run);

        Ok(match target {
            CredentialTarget::Forge => Box::new(ForgeRegistry::from_resolver(&resolver, config)?),
            CredentialTarget::Nexus => Box::new(NexusRepository::from_resolver(&resolver, config)?),
        })
    }
}

/// First non-empty proxy setting
pub fn proxy_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    PROXY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}
