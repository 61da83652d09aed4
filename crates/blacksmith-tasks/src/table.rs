//! The release task table

use crate::dag::TaskGraph;
use crate::task::{TaskDefinition, TaskId};

/// Bump levels exposed as `bump:<level>` and `bump_commit:<level>`
pub const BUMP_LEVELS: [&str; 4] = ["major", "minor", "patch", "full"];

/// Build the standard release task graph
///
/// With `build` disabled the upload tasks lose their `build` prerequisite
/// and the release chains stop after tagging.
pub fn standard_tasks(build: bool) -> TaskGraph {
    let mut graph = TaskGraph::new()
        .with(TaskDefinition::new("clean", "Remove the package directory"))
        .with(TaskDefinition::new("build", "Build the module package"));

    for level in BUMP_LEVELS {
        let bump = TaskId::with_arg("bump", level);
        graph.add(TaskDefinition::new(
            bump.clone(),
            format!("Bump the {} version in the manifest", level),
        ));
        graph.add(
            TaskDefinition::new(
                TaskId::with_arg("bump_commit", level),
                format!("Bump the {} version and commit the manifest", level),
            )
            .with_depends_on(bump),
        );
    }

    graph.add(TaskDefinition::new("tag", "Tag the current version"));
    graph.add(
        TaskDefinition::new("push", "Upload the package to the Puppet Forge")
            .with_depends_on_if(build, "build"),
    );
    graph.add(
        TaskDefinition::new("push_nexus", "Upload the package to Nexus")
            .with_depends_on_if(build, "build"),
    );

    for (name, upload, target) in [
        ("release", "push", "the Puppet Forge"),
        ("release_nexus", "push_nexus", "Nexus"),
    ] {
        graph.add(
            TaskDefinition::new(
                name,
                format!("Release a patch version to {} and push to git", target),
            )
            .with_depends_on("clean")
            .with_depends_on_if(build, "build")
            .with_depends_on("bump_commit:patch")
            .with_depends_on("tag")
            .with_depends_on_if(build, upload),
        );
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(graph: &TaskGraph, target: &str) -> Vec<String> {
        graph
            .plan(&TaskId::new(target))
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_release_chain() {
        let graph = standard_tasks(true);
        assert_eq!(
            plan(&graph, "release"),
            vec!["clean", "build", "bump:patch", "bump_commit:patch", "tag", "push", "release"]
        );
        assert_eq!(
            plan(&graph, "release_nexus"),
            vec!["clean", "build", "bump:patch", "bump_commit:patch", "tag", "push_nexus", "release_nexus"]
        );
    }

    #[test]
    fn test_release_chain_without_build() {
        let graph = standard_tasks(false);
        assert_eq!(
            plan(&graph, "release"),
            vec!["clean", "bump:patch", "bump_commit:patch", "tag", "release"]
        );
        assert_eq!(plan(&graph, "push"), vec!["push"]);
    }

    #[test]
    fn test_bump_commit_depends_on_bump() {
        let graph = standard_tasks(true);
        for level in BUMP_LEVELS {
            let target = format!("bump_commit:{}", level);
            assert_eq!(plan(&graph, &target), vec![format!("bump:{}", level), target.clone()]);
        }
    }

    #[test]
    fn test_table_is_valid() {
        let graph = standard_tasks(true);
        assert!(graph.validate().is_ok());
        assert_eq!(graph.len(), 2 + 2 * BUMP_LEVELS.len() + 5);
    }
}
