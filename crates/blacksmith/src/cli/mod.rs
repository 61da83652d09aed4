//! CLI definition and command handling

pub mod actions;
pub mod commands;
pub mod output;
pub mod project;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use actions::ActionOptions;
use commands::{
    BumpCommand, BumpCommitCommand, CompletionsCommand, DependencyCommand, InitCommand,
    PushCommand, ReleaseCommand, TasksCommand, VersionCommand,
};
use project::Project;

/// Blacksmith - Release tool for Puppet modules
#[derive(Debug, Parser)]
#[command(name = "blacksmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Module directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Manifest path, relative to the module directory
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the module version
    Version(VersionCommand),

    /// Bump the version in the manifest
    Bump(BumpCommand),

    /// Bump the version and commit the manifest
    BumpCommit(BumpCommitCommand),

    /// Tag the current version
    Tag,

    /// Upload the built package
    Push(PushCommand),

    /// Clean, build, bump, tag, upload and push to git
    Release(ReleaseCommand),

    /// Raise the minimum version of a dependency
    Dependency(DependencyCommand),

    /// Remove the package directory
    Clean,

    /// Build the module package
    Build,

    /// List the release tasks and their prerequisites
    Tasks(TasksCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Bump(ref cmd) => cmd.execute(&self),
            Commands::BumpCommit(ref cmd) => cmd.execute(&self),
            Commands::Tag => self.run_simple_task("tag"),
            Commands::Push(ref cmd) => cmd.execute(&self),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::Dependency(ref cmd) => cmd.execute(&self),
            Commands::Clean => self.run_simple_task("clean"),
            Commands::Build => self.run_simple_task("build"),
            Commands::Tasks(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the module the command operates on
    pub fn project(&self) -> anyhow::Result<Project> {
        Project::load(self.directory.as_deref(), self.manifest.as_deref())
    }

    /// Action options carrying the global flags
    pub fn action_options(&self) -> ActionOptions {
        ActionOptions {
            quiet: self.quiet,
            ..ActionOptions::default()
        }
    }

    fn run_simple_task(&self, task: &str) -> anyhow::Result<()> {
        let project = self.project()?;
        let build = project.config().build;
        commands::run_task(&project, build, task.into(), self.action_options())?;
        Ok(())
    }
}
