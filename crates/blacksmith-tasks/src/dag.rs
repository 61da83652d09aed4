//! Task graph construction and planning

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::task::{TaskDefinition, TaskId};

/// Named tasks with ordered prerequisites, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<TaskDefinition>,
    index: HashMap<TaskId, usize>,
}

impl TaskGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, replacing any earlier definition with the same id
    pub fn add(&mut self, task: TaskDefinition) -> &mut Self {
        match self.index.get(&task.id) {
            Some(&i) => self.tasks[i] = task,
            None => {
                self.index.insert(task.id.clone(), self.tasks.len());
                self.tasks.push(task);
            }
        }
        self
    }

    /// Builder-style [`TaskGraph::add`]
    pub fn with(mut self, task: TaskDefinition) -> Self {
        self.add(task);
        self
    }

    /// Look up a task
    pub fn get(&self, id: &TaskId) -> Option<&TaskDefinition> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    /// All tasks in declaration order
    pub fn tasks(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    /// Get the total number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Execution order for `target`: prerequisites depth-first in declared
    /// order, each task once, the target last
    #[instrument(skip_all, fields(task = %target))]
    pub fn plan(&self, target: &TaskId) -> Result<Vec<TaskId>, DagError> {
        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut stack = Vec::new();
        self.visit(target, &mut stack, &mut done, &mut order)?;
        debug!(order = ?order, "planned tasks");
        Ok(order)
    }

    /// Check that every prerequisite exists and nothing is cyclic
    pub fn validate(&self) -> Result<(), DagError> {
        let mut done = HashSet::new();
        let mut order = Vec::new();
        for task in &self.tasks {
            self.visit(&task.id, &mut Vec::new(), &mut done, &mut order)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        id: &TaskId,
        stack: &mut Vec<TaskId>,
        done: &mut HashSet<TaskId>,
        order: &mut Vec<TaskId>,
    ) -> Result<(), DagError> {
        if done.contains(id) {
            return Ok(());
        }

        if let Some(pos) = stack.iter().position(|s| s == id) {
            let cycle: Vec<String> = stack[pos..]
                .iter()
                .chain(std::iter::once(id))
                .map(|t| t.to_string())
                .collect();
            return Err(DagError::CyclicDependency(cycle.join(" -> ")));
        }

        let task = self.get(id).ok_or_else(|| match stack.last() {
            Some(parent) => DagError::MissingPrerequisite {
                task: parent.to_string(),
                prerequisite: id.to_string(),
            },
            None => DagError::TaskNotFound(id.to_string()),
        })?;

        stack.push(id.clone());
        for dep in &task.depends_on {
            self.visit(dep, stack, done, order)?;
        }
        stack.pop();

        done.insert(id.clone());
        order.push(id.clone());
        Ok(())
    }
}

/// Errors during graph planning
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// Cyclic dependency detected
    #[error("Cyclic dependency detected among tasks: {0}")]
    CyclicDependency(String),

    /// Task not found in the graph
    #[error("Unknown task '{0}'")]
    TaskNotFound(String),

    /// A task names a prerequisite that does not exist
    #[error("Task '{task}' depends on unknown task '{prerequisite}'")]
    MissingPrerequisite { task: String, prerequisite: String },
}
