//! CLI commands

mod bump;
mod completions;
mod dependency;
mod init;
mod push;
mod release;
mod tasks;
mod version;

pub use bump::{BumpCommand, BumpCommitCommand};
pub use completions::CompletionsCommand;
pub use dependency::DependencyCommand;
pub use init::InitCommand;
pub use push::PushCommand;
pub use release::ReleaseCommand;
pub use tasks::TasksCommand;
pub use version::VersionCommand;

use std::sync::Arc;

use tracing::debug;

use blacksmith_tasks::{standard_tasks, RunSummary, TaskId, TaskRunner};

use crate::cli::actions::{ActionOptions, ReleaseActions};
use crate::cli::output::ConsoleReporter;
use crate::cli::project::Project;

/// Run `target` and its prerequisites from the standard task table
pub(crate) fn run_task(
    project: &Project,
    build: bool,
    target: TaskId,
    options: ActionOptions,
) -> anyhow::Result<RunSummary> {
    debug!(
        task = %target,
        build,
        config = ?project.config_path(),
        "running task"
    );
    let graph = standard_tasks(build);
    let reporter = Arc::new(ConsoleReporter::new(options.quiet));
    let mut runner = TaskRunner::new(&graph).with_reporter(reporter);
    let mut actions = ReleaseActions::new(project, options);

    Ok(runner.run(&target, &mut actions)?)
}
