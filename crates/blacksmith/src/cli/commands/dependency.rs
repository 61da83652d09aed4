//! Dependency command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli};

/// Raise the minimum version a dependency requires
#[derive(Debug, Args)]
pub struct DependencyCommand {
    /// Dependency name, `author-module` or `author/module`
    pub module_name: String,

    /// New minimum version
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: String,
}

impl DependencyCommand {
    /// Execute the dependency command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(module = %self.module_name, version = %self.version, "executing dependency command");
        let project = cli.project()?;
        let mut metadata = project.metadata()?;

        let requirement = metadata.set_dependency_minimum(&self.module_name, &self.version)?;
        project.save_metadata(&metadata)?;

        if !cli.quiet {
            output::success(&format!(
                "{} now requires {}",
                self.module_name,
                output::version_style().apply_to(&requirement)
            ));
        }
        Ok(())
    }
}
