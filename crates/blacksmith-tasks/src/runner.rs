//! Sequential task runner

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use crate::dag::{DagError, TaskGraph};
use crate::reporter::{TaskEvent, TaskReporter, TracingReporter};
use crate::task::{TaskDefinition, TaskId};

/// Performs the action behind a task
pub trait TaskExecutor {
    /// Error returned by a failing task
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run one task; its prerequisites have already succeeded
    fn execute(&mut self, task: &TaskDefinition) -> Result<(), Self::Error>;
}

impl<F, E> TaskExecutor for F
where
    F: FnMut(&TaskDefinition) -> Result<(), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn execute(&mut self, task: &TaskDefinition) -> Result<(), E> {
        self(task)
    }
}

/// Why a run stopped
#[derive(Debug, thiserror::Error)]
pub enum RunError<E: std::error::Error + 'static> {
    /// The target could not be planned
    #[error(transparent)]
    Graph(#[from] DagError),

    /// A task failed; later tasks did not run
    #[error("Task '{task}' failed")]
    Task {
        task: TaskId,
        #[source]
        source: E,
    },
}

/// Tasks touched by a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tasks executed, in order
    pub executed: Vec<TaskId>,
    /// Tasks skipped because an earlier run already did them
    pub skipped: Vec<TaskId>,
}

/// Runs targets from a [`TaskGraph`], each task at most once for the
/// lifetime of the runner
pub struct TaskRunner<'g> {
    graph: &'g TaskGraph,
    completed: HashSet<TaskId>,
    reporter: Arc<dyn TaskReporter>,
}

impl<'g> TaskRunner<'g> {
    /// Create a runner that reports through tracing
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self {
            graph,
            completed: HashSet::new(),
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn TaskReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Tasks completed so far
    pub fn completed(&self) -> &HashSet<TaskId> {
        &self.completed
    }

    /// Run `target` and everything it depends on
    ///
    /// Execution stops at the first failing task.
    #[instrument(skip_all, fields(task = %target))]
    pub fn run<X: TaskExecutor>(
        &mut self,
        target: &TaskId,
        executor: &mut X,
    ) -> Result<RunSummary, RunError<X::Error>> {
        let start = Instant::now();
        let plan = self.graph.plan(target)?;
        let mut summary = RunSummary::default();

        for id in plan {
            if self.completed.contains(&id) {
                self.reporter.report(&TaskEvent::Skipped {
                    id: id.clone(),
                    reason: "already run".to_string(),
                });
                summary.skipped.push(id);
                continue;
            }

            let task = self
                .graph
                .get(&id)
                .ok_or_else(|| DagError::TaskNotFound(id.to_string()))?;

            self.reporter.report(&TaskEvent::Started {
                id: id.clone(),
                description: task.description.clone(),
            });

            let task_start = Instant::now();
            if let Err(source) = executor.execute(task) {
                self.reporter.report(&TaskEvent::Failed {
                    id: id.clone(),
                    duration: task_start.elapsed(),
                    error: source.to_string(),
                });
                return Err(RunError::Task { task: id, source });
            }

            self.reporter.report(&TaskEvent::Completed {
                id: id.clone(),
                duration: task_start.elapsed(),
            });
            self.completed.insert(id.clone());
            summary.executed.push(id);
        }

        info!(
            executed = summary.executed.len(),
            skipped = summary.skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Boom(String);

    fn graph() -> TaskGraph {
        TaskGraph::new()
            .with(TaskDefinition::new("clean", "clean"))
            .with(TaskDefinition::new("build", "build").with_depends_on("clean"))
            .with(TaskDefinition::new("tag", "tag"))
            .with(
                TaskDefinition::new("release", "release")
                    .with_depends_on("clean")
                    .with_depends_on("build")
                    .with_depends_on("tag"),
            )
    }

    #[test]
    fn test_runs_in_order_once() {
        let graph = graph();
        let mut ran = Vec::new();
        let mut runner = TaskRunner::new(&graph);

        let summary = runner
            .run(&TaskId::new("release"), &mut |task: &TaskDefinition| {
                ran.push(task.id.to_string());
                Ok::<_, Boom>(())
            })
            .unwrap();

        assert_eq!(ran, vec!["clean", "build", "tag", "release"]);
        assert_eq!(summary.executed.len(), 4);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn test_second_run_skips_completed() {
        let graph = graph();
        let reporter = Arc::new(CollectingReporter::new());
        let mut runner = TaskRunner::new(&graph).with_reporter(reporter.clone());
        let mut count = 0;

        let mut executor = |_: &TaskDefinition| {
            count += 1;
            Ok::<_, Boom>(())
        };
        runner.run(&TaskId::new("build"), &mut executor).unwrap();
        let summary = runner.run(&TaskId::new("release"), &mut executor).unwrap();

        assert_eq!(count, 4);
        assert_eq!(summary.skipped, vec![TaskId::new("clean"), TaskId::new("build")]);
        assert_eq!(summary.executed, vec![TaskId::new("tag"), TaskId::new("release")]);
        assert!(reporter
            .events()
            .iter()
            .any(|e| matches!(e, TaskEvent::Skipped { id, .. } if id.as_str() == "clean")));
    }

    #[test]
    fn test_failure_stops_run() {
        let graph = graph();
        let reporter = Arc::new(CollectingReporter::new());
        let mut runner = TaskRunner::new(&graph).with_reporter(reporter.clone());
        let mut ran = Vec::new();

        let result = runner.run(&TaskId::new("release"), &mut |task: &TaskDefinition| {
            ran.push(task.id.to_string());
            if task.id.as_str() == "build" {
                Err(Boom("pdk missing".to_string()))
            } else {
                Ok(())
            }
        });

        match result {
            Err(RunError::Task { task, source }) => {
                assert_eq!(task.as_str(), "build");
                assert_eq!(source.to_string(), "pdk missing");
            }
            other => panic!("expected task failure, got {:?}", other),
        }
        assert_eq!(ran, vec!["clean", "build"]);
        assert_eq!(reporter.completed(), vec![TaskId::new("clean")]);
        assert!(!runner.completed().contains(&TaskId::new("build")));
    }

    #[test]
    fn test_unknown_target() {
        let graph = graph();
        let mut runner = TaskRunner::new(&graph);
        let result = runner.run(&TaskId::new("deploy"), &mut |_: &TaskDefinition| Ok::<_, Boom>(()));
        assert!(matches!(result, Err(RunError::Graph(DagError::TaskNotFound(_)))));
    }
}
