//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "blacksmith.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "blacksmith.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".blacksmith.yaml";

/// Module manifest read and written by the version tasks
pub const DEFAULT_MANIFEST: &str = "metadata.json";

/// Directory module builds drop their tarballs into
pub const DEFAULT_PACKAGE_DIR: &str = "pkg";

/// Placeholder substituted with the computed version
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Tags are the bare version unless configured otherwise
pub const DEFAULT_TAG_PATTERN: &str = "{version}";

/// Commit message for manifest bumps
pub const DEFAULT_COMMIT_MESSAGE: &str = "[blacksmith] Bump version to {version}";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".blacksmith.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Blacksmith Configuration

manifest: metadata.json
package_dir: pkg
build: true

git:
  remote: origin
  tag_pattern: "{version}"
  commit_message: "[blacksmith] Bump version to {version}"
"#;
