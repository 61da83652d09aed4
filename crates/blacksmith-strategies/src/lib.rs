//! Blacksmith Strategies - Version arithmetic for module releases
//!
//! This crate computes next versions under a bump level and edits
//! dependency version requirements without disturbing their formatting.

pub mod requirement;
mod semver;
pub mod types;

pub use requirement::{Clause, Operator, VersionRequirement};
pub use semver::SemVerStrategy;
pub use types::VersionComponents;
