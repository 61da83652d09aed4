//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::defaults::VERSION_PLACEHOLDER;
use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_template("git.tag_pattern", &config.git.tag_pattern)?;
    validate_template("git.commit_message", &config.git.commit_message)?;

    if config.git.remote.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    if config.manifest.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "manifest".to_string(),
            message: "manifest path cannot be empty".to_string(),
        }
        .into());
    }

    debug!("configuration validation passed");
    Ok(())
}

/// Check that a template carries exactly one `{version}` placeholder
pub fn validate_template(field: &str, template: &str) -> Result<()> {
    let count = template.matches(VERSION_PLACEHOLDER).count();
    if count != 1 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!(
                "must contain the {} placeholder exactly once (found {})",
                VERSION_PLACEHOLDER, count
            ),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_template_without_placeholder() {
        assert!(validate_template("git.tag_pattern", "release").is_err());
    }

    #[test]
    fn test_template_with_two_placeholders() {
        assert!(validate_template("git.tag_pattern", "{version}-{version}").is_err());
    }

    #[test]
    fn test_empty_remote() {
        let mut config = Config::default();
        config.git.remote = " ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
