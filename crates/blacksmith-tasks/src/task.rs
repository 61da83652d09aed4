//! Task types and definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task name as exposed on the command line, e.g. `tag` or `bump:minor`
///
/// Everything after the first `:` is the task argument.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create a task ID from its full name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create `base:arg`
    pub fn with_arg(base: &str, arg: impl fmt::Display) -> Self {
        Self(format!("{}:{}", base, arg))
    }

    /// Full name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without the argument
    pub fn base(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(base, _)| base)
    }

    /// Argument after the first `:`, if any
    pub fn arg(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, arg)| arg)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TaskId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Definition of a task in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task identifier
    pub id: TaskId,

    /// One-line description for listings
    pub description: String,

    /// Tasks that must run first, in order
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
}

impl TaskDefinition {
    /// Create a task without prerequisites
    pub fn new(id: impl Into<TaskId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            depends_on: Vec::new(),
        }
    }

    /// Append a prerequisite
    pub fn with_depends_on(mut self, task: impl Into<TaskId>) -> Self {
        self.depends_on.push(task.into());
        self
    }

    /// Append a prerequisite only when `enabled`
    pub fn with_depends_on_if(self, enabled: bool, task: impl Into<TaskId>) -> Self {
        if enabled {
            self.with_depends_on(task)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_parts() {
        let id = TaskId::with_arg("bump", "minor");
        assert_eq!(id.as_str(), "bump:minor");
        assert_eq!(id.base(), "bump");
        assert_eq!(id.arg(), Some("minor"));

        let plain = TaskId::new("tag");
        assert_eq!(plain.base(), "tag");
        assert_eq!(plain.arg(), None);
    }

    #[test]
    fn test_conditional_dependency() {
        let with = TaskDefinition::new("push", "upload").with_depends_on_if(true, "build");
        let without = TaskDefinition::new("push", "upload").with_depends_on_if(false, "build");
        assert_eq!(with.depends_on, vec![TaskId::new("build")]);
        assert!(without.depends_on.is_empty());
    }
}
