//! Blacksmith Core - Core library for module releases
//!
//! This crate provides the foundational types, error handling, project
//! configuration and credential resolution shared by the Blacksmith crates.

pub mod config;
pub mod credentials;
pub mod error;
pub mod types;

pub use credentials::{CredentialResolver, CredentialTarget, Credentials};
pub use error::{BlacksmithError, Result};
pub use types::{BumpLevel, PackageInfo};
