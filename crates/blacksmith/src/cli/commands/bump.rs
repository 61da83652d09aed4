//! Bump commands

use clap::Args;
use tracing::info;

use blacksmith_core::BumpLevel;
use blacksmith_tasks::TaskId;

use crate::cli::actions::ActionOptions;
use crate::cli::{output, Cli};

/// Level and optional explicit version shared by the bump commands
#[derive(Debug, Clone, Args)]
pub struct BumpArgs {
    /// Part of the version to bump (major, minor, patch, full)
    #[arg(default_value_t = BumpLevel::Patch)]
    pub level: BumpLevel,

    /// Replacement version, required for `full`
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: Option<String>,
}

impl BumpArgs {
    fn run(&self, cli: &Cli, task: &str) -> anyhow::Result<()> {
        info!(level = %self.level, version = ?self.version, task, "executing bump command");
        if self.version.is_some() && self.level != BumpLevel::Full && !cli.quiet {
            output::warning(&format!("VERSION is only used by a full bump; ignoring it for {}", self.level));
        }

        let project = cli.project()?;
        let options = ActionOptions {
            target_version: self.version.clone(),
            ..cli.action_options()
        };
        super::run_task(
            &project,
            project.config().build,
            TaskId::with_arg(task, self.level),
            options,
        )?;
        Ok(())
    }
}

/// Bump the version in the manifest
#[derive(Debug, Args)]
pub struct BumpCommand {
    #[command(flatten)]
    pub args: BumpArgs,
}

impl BumpCommand {
    /// Execute the bump command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        self.args.run(cli, "bump")
    }
}

/// Bump the version and commit the manifest
#[derive(Debug, Args)]
pub struct BumpCommitCommand {
    #[command(flatten)]
    pub args: BumpArgs,
}

impl BumpCommitCommand {
    /// Execute the bump-commit command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        self.args.run(cli, "bump_commit")
    }
}
