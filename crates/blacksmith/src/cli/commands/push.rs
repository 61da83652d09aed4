//! Push command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::actions::ActionOptions;
use crate::cli::Cli;

/// Upload the built package to the Forge or Nexus
#[derive(Debug, Args)]
pub struct PushCommand {
    /// Upload to Nexus instead of the Puppet Forge
    #[arg(long)]
    pub nexus: bool,

    /// Package to upload instead of the newest match in the package directory
    #[arg(long, value_name = "PATH")]
    pub package: Option<PathBuf>,

    /// Locate the package and check credentials without uploading
    #[arg(long)]
    pub dry_run: bool,
}

impl PushCommand {
    /// Execute the push command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(nexus = self.nexus, package = ?self.package, dry_run = self.dry_run, "executing push command");
        let project = cli.project()?;

        // an explicit package is uploaded as-is
        let build = project.config().build && self.package.is_none();
        let target = if self.nexus { "push_nexus" } else { "push" };
        let options = ActionOptions {
            artifact: self.package.clone(),
            dry_run: self.dry_run,
            ..cli.action_options()
        };

        super::run_task(&project, build, target.into(), options)?;
        Ok(())
    }
}
