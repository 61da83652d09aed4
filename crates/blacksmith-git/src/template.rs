//! `{version}` templates for tag names and commit messages

use blacksmith_core::config::{validate_template, VERSION_PLACEHOLDER};

/// A string with exactly one `{version}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTemplate {
    template: String,
}

impl VersionTemplate {
    /// Validate `template`; `field` names the setting in error messages
    pub fn new(field: &str, template: impl Into<String>) -> blacksmith_core::Result<Self> {
        let template = template.into();
        validate_template(field, &template)?;
        Ok(Self { template })
    }

    /// Substitute the version
    pub fn render(&self, version: &str) -> String {
        self.template.replacen(VERSION_PLACEHOLDER, version, 1)
    }
}
