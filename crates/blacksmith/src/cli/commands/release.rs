//! Release command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli};

/// Run the full release chain
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Upload to Nexus instead of the Puppet Forge
    #[arg(long)]
    pub nexus: bool,

    /// Skip building and uploading the package
    #[arg(long)]
    pub no_build: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(nexus = self.nexus, no_build = self.no_build, "executing release command");
        let project = cli.project()?;
        let build = project.config().build && !self.no_build;
        let target = if self.nexus { "release_nexus" } else { "release" };

        let summary = super::run_task(&project, build, target.into(), cli.action_options())?;

        if !cli.quiet {
            let metadata = project.metadata()?;
            println!();
            output::success(&format!(
                "{} {} {} ({} tasks)",
                output::header("Released"),
                metadata.name(),
                output::version_style().apply_to(metadata.version()),
                summary.executed.len()
            ));
        }
        Ok(())
    }
}
