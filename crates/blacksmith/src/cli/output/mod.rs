//! Output formatting utilities

use console::{style, Style};

use blacksmith_tasks::{TaskEvent, TaskReporter, TracingReporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for tags
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Prints a status line as each task starts, and logs every event
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
    tracing: TracingReporter,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            tracing: TracingReporter,
        }
    }
}

impl TaskReporter for ConsoleReporter {
    fn report(&self, event: &TaskEvent) {
        self.tracing.report(event);
        if self.quiet {
            return;
        }
        if let TaskEvent::Started { id, description } = event {
            info(&format!("{} {}", style(id).bold(), style(description).dim()));
        }
    }
}
