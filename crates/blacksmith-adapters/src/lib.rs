//! Blacksmith Adapters - Package adapters for module releases
//!
//! This crate reads and rewrites the Puppet module manifest and drives the
//! external build tooling.

pub mod puppet;
mod traits;

pub use puppet::{BuildTool, Dependency, Metadata, PuppetAdapter};
pub use traits::PackageAdapter;
