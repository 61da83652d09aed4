//! Init command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use blacksmith_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML};

use crate::cli::{output, Cli};

/// Configuration file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
}

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// File format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Yaml)]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, format = ?self.format, "executing init command");
        let dir = match &cli.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config_path = self.output.clone().unwrap_or_else(|| {
            dir.join(match self.format {
                ConfigFormat::Yaml => DEFAULT_CONFIG_YAML,
                ConfigFormat::Toml => DEFAULT_CONFIG_TOML,
            })
        });

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, self.content()?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created {}",
                output::path_style().apply_to(config_path.display())
            ));
        }
        Ok(())
    }

    fn content(&self) -> anyhow::Result<String> {
        Ok(match self.format {
            ConfigFormat::Yaml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            ConfigFormat::Toml => toml::to_string_pretty(&Config::default())?,
        })
    }
}
