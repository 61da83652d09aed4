//! Tasks command

use clap::Args;
use console::style;
use tracing::info;

use blacksmith_tasks::{standard_tasks, TaskGraph};

use crate::cli::{output, Cli};

/// List the release tasks
#[derive(Debug, Args)]
pub struct TasksCommand {
    /// Show the table as it looks with building disabled
    #[arg(long)]
    pub no_build: bool,
}

impl TasksCommand {
    /// Execute the tasks command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(no_build = self.no_build, "executing tasks command");
        let graph = standard_tasks(!self.no_build);
        graph.validate()?;

        if cli.quiet {
            for task in graph.tasks() {
                println!("{}", task.id);
            }
            return Ok(());
        }

        println!("{}", output::header("Tasks"));
        println!();
        for line in render(&graph) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// One line per task: name, description and prerequisites
fn render(graph: &TaskGraph) -> Vec<String> {
    let width = graph
        .tasks()
        .iter()
        .map(|task| task.id.as_str().len())
        .max()
        .unwrap_or_default();

    graph
        .tasks()
        .iter()
        .map(|task| {
            let name = format!("{:width$}", task.id.as_str(), width = width);
            let mut line = format!("  {}  {}", style(name).cyan(), task.description);
            if !task.depends_on.is_empty() {
                let deps: Vec<&str> = task.depends_on.iter().map(|d| d.as_str()).collect();
                line.push_str(&format!(" {}", style(format!("[{}]", deps.join(", "))).dim()));
            }
            line
        })
        .collect()
}
