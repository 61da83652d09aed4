//! Package repository upload clients for Blacksmith
//!
//! ## Supported Targets
//!
//! - **Puppet Forge**: public module registry (`/v3/releases`), API key or
//!   basic authentication
//! - **Nexus**: private Maven-style artifact repository
//!   (`/service/local/artifact/maven/content`), basic authentication
//!
//! ## Usage
//!
//! ```ignore
//! use blacksmith_core::{CredentialResolver, CredentialTarget};
//! use blacksmith_stores::{ArtifactUploader, UploadConfig, registries::NexusRepository};
//!
//! let resolver = CredentialResolver::from_environment(CredentialTarget::Nexus, ".");
//! let nexus = NexusRepository::from_resolver(&resolver, UploadConfig::default())?;
//! nexus.push(None, &package)?;
//! ```

pub mod artifacts;
pub mod error;
pub mod registries;
pub mod traits;
pub mod types;

pub use error::{Result, StoreError};
pub use traits::ArtifactUploader;
pub use types::{UploadConfig, UploadResult};
