//! Version command

use clap::Args;
use console::style;
use tracing::info;

use blacksmith_core::BumpLevel;
use blacksmith_strategies::SemVerStrategy;

use crate::cli::Cli;

/// Print the current version, or the one a bump would produce
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Print the next version for LEVEL (default patch) without writing it
    #[arg(long, value_name = "LEVEL", num_args = 0..=1, default_missing_value = "patch")]
    pub next: Option<BumpLevel>,

    /// Replacement version for `--next full`
    #[arg(id = "target_version", value_name = "VERSION", requires = "next")]
    pub version: Option<String>,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(next = ?self.next, "executing version command");
        let project = cli.project()?;
        let metadata = project.metadata()?;
        let current = metadata.version();

        let Some(level) = self.next else {
            println!("{}", current);
            return Ok(());
        };

        let next = SemVerStrategy::new().next_version(current, level, self.version.as_deref())?;
        if cli.quiet || !console::user_attended() {
            println!("{}", next);
        } else {
            println!(
                "{} {} {} ({})",
                style(current).cyan(),
                style("→").dim(),
                style(&next).green().bold(),
                level
            );
        }
        Ok(())
    }
}
