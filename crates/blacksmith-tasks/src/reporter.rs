//! Task execution reporting

use std::sync::Mutex;
use std::time::Duration;

use crate::task::TaskId;

/// Events emitted while a target runs
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// A task is about to run
    Started { id: TaskId, description: String },
    /// A task finished successfully
    Completed { id: TaskId, duration: Duration },
    /// A task failed; nothing after it runs
    Failed {
        id: TaskId,
        duration: Duration,
        error: String,
    },
    /// A task was not run again
    Skipped { id: TaskId, reason: String },
}

impl TaskEvent {
    /// Task this event is about
    pub fn id(&self) -> &TaskId {
        match self {
            Self::Started { id, .. }
            | Self::Completed { id, .. }
            | Self::Failed { id, .. }
            | Self::Skipped { id, .. } => id,
        }
    }
}

/// Receives task progress
pub trait TaskReporter: Send + Sync {
    /// Handle a task event
    fn report(&self, event: &TaskEvent);
}

/// Logs task progress through tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TaskReporter for TracingReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Started { id, description } => {
                tracing::info!(task = %id, "Starting {}: {}", id, description);
            }
            TaskEvent::Completed { id, duration } => {
                tracing::info!(
                    task = %id,
                    duration_ms = duration.as_millis(),
                    "{} completed in {:.1}s",
                    id,
                    duration.as_secs_f64()
                );
            }
            TaskEvent::Failed { id, duration, error } => {
                tracing::error!(
                    task = %id,
                    duration_ms = duration.as_millis(),
                    "{} failed after {:.1}s: {}",
                    id,
                    duration.as_secs_f64(),
                    error
                );
            }
            TaskEvent::Skipped { id, reason } => {
                tracing::debug!(task = %id, "{} skipped: {}", id, reason);
            }
        }
    }
}

/// Keeps every event for later inspection
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<TaskEvent>>,
}

impl CollectingReporter {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Ids of tasks that reached `Completed`, in order
    pub fn completed(&self) -> Vec<TaskId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TaskEvent::Completed { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }
}

impl TaskReporter for CollectingReporter {
    fn report(&self, event: &TaskEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::new();
        reporter.report(&TaskEvent::Started {
            id: TaskId::new("clean"),
            description: "Remove the package directory".to_string(),
        });
        reporter.report(&TaskEvent::Completed {
            id: TaskId::new("clean"),
            duration: Duration::from_millis(3),
        });
        reporter.report(&TaskEvent::Skipped {
            id: TaskId::new("build"),
            reason: "already run".to_string(),
        });

        assert_eq!(reporter.events().len(), 3);
        assert_eq!(reporter.completed(), vec![TaskId::new("clean")]);
        assert_eq!(reporter.events()[2].id().as_str(), "build");
    }

    #[test]
    fn test_tracing_reporter_handles_all_events() {
        let reporter = TracingReporter;
        let id = TaskId::new("tag");
        reporter.report(&TaskEvent::Started { id: id.clone(), description: "Tag".into() });
        reporter.report(&TaskEvent::Failed {
            id,
            duration: Duration::from_secs(1),
            error: "tag exists".into(),
        });
    }
}
