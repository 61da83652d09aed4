//! Actions bound to the release task table

use std::path::PathBuf;

use console::style;
use tracing::info;

use blacksmith_adapters::PackageAdapter;
use blacksmith_core::error::GitError;
use blacksmith_core::{BlacksmithError, BumpLevel, CredentialTarget};
use blacksmith_stores::StoreError;
use blacksmith_tasks::{TaskDefinition, TaskExecutor};

use crate::cli::output;
use crate::cli::project::Project;

/// Failure of a single task action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Blacksmith(#[from] BlacksmithError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The graph names a task with no action behind it
    #[error("No action is bound to task '{0}'")]
    Unbound(String),
}

/// Options that only some tasks read
#[derive(Debug, Clone, Default)]
pub struct ActionOptions {
    /// Replacement version for `bump:full`
    pub target_version: Option<String>,
    /// Explicit artifact for the upload tasks
    pub artifact: Option<PathBuf>,
    /// Locate the artifact without uploading
    pub dry_run: bool,
    /// Suppress status lines
    pub quiet: bool,
}

/// Runs task actions against a project
pub struct ReleaseActions<'p> {
    project: &'p Project,
    options: ActionOptions,
}

impl<'p> ReleaseActions<'p> {
    pub fn new(project: &'p Project, options: ActionOptions) -> Self {
        Self { project, options }
    }

    fn report(&self, message: &str) {
        if !self.options.quiet {
            output::success(message);
        }
    }

    fn clean(&self) -> Result<(), ActionError> {
        self.project.adapter().clean(self.project.root())?;
        self.report(&format!(
            "Removed {}",
            output::path_style().apply_to(self.project.package_dir().display())
        ));
        Ok(())
    }

    fn build(&self) -> Result<(), ActionError> {
        self.project.adapter().build(self.project.root())?;
        self.report(&format!(
            "Built package into {}",
            output::path_style().apply_to(self.project.package_dir().display())
        ));
        Ok(())
    }

    fn bump(&self, level: BumpLevel) -> Result<(), ActionError> {
        let mut metadata = self.project.metadata()?;
        let previous = metadata.version().to_string();
        let next = metadata.bump(level, self.options.target_version.as_deref())?;
        self.project.save_metadata(&metadata)?;

        info!(from = %previous, to = %next, %level, "bumped manifest version");
        self.report(&format!(
            "Bumped {} to {}",
            metadata.name(),
            output::version_style().apply_to(&next)
        ));
        Ok(())
    }

    fn commit(&self) -> Result<(), ActionError> {
        let version = self.project.metadata()?.version().to_string();
        self.project
            .tagger()?
            .commit_manifest(&self.project.manifest_path(), &version)?;
        self.report(&format!("Committed {}", self.project.config().manifest.display()));
        Ok(())
    }

    fn tag(&self) -> Result<(), ActionError> {
        let version = self.project.metadata()?.version().to_string();
        let tag = self.project.tagger()?.tag(&version)?;
        self.report(&format!("Tagged {}", output::tag_style().apply_to(&tag)));
        Ok(())
    }

    fn upload(&self, target: CredentialTarget) -> Result<(), ActionError> {
        let metadata = self.project.metadata()?;
        let package = metadata.package_info(&self.project.manifest_path());
        let uploader = self.project.uploader(target, self.options.dry_run)?;

        let result = uploader.push(self.options.artifact.as_deref(), &package)?;
        if result.dry_run {
            self.report(&format!(
                "Would upload {} to {} {}",
                output::path_style().apply_to(result.artifact.display()),
                uploader.name(),
                style("(dry run)").dim()
            ));
        } else {
            self.report(&format!(
                "Uploaded {} {} to {}",
                package.name,
                output::version_style().apply_to(&package.version),
                uploader.name()
            ));
        }
        Ok(())
    }

    fn push_git(&self) -> Result<(), ActionError> {
        let tagger = self.project.tagger()?;
        tagger.push()?;
        self.report(&format!("Pushed to {}", tagger.remote()));
        Ok(())
    }
}

impl TaskExecutor for ReleaseActions<'_> {
    type Error = ActionError;

    fn execute(&mut self, task: &TaskDefinition) -> Result<(), ActionError> {
        let level = || -> Result<BumpLevel, ActionError> {
            task.id
                .arg()
                .unwrap_or_default()
                .parse::<BumpLevel>()
                .map_err(|e| BlacksmithError::from(e).into())
        };

        match task.id.base() {
            "clean" => self.clean(),
            "build" => self.build(),
            "bump" => self.bump(level()?),
            "bump_commit" => self.commit(),
            "tag" => self.tag(),
            "push" => self.upload(CredentialTarget::Forge),
            "push_nexus" => self.upload(CredentialTarget::Nexus),
            "release" | "release_nexus" => self.push_git(),
            _ => Err(ActionError::Unbound(task.id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blacksmith_core::error::VersionError;
    use blacksmith_tasks::{standard_tasks, TaskId, TaskRunner};
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
  "name": "acme-ntp",
  "version": "1.2.3",
  "author": "acme",
  "dependencies": [
    {
      "name": "puppetlabs/stdlib",
      "version_requirement": ">= 4.13.1 < 9.0.0"
    }
  ]
}
"#;

    fn quiet() -> ActionOptions {
        ActionOptions {
            quiet: true,
            ..ActionOptions::default()
        }
    }

    /// Module checked into a fresh repository with one commit
    fn seed_module() -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();
        config.set_bool("tag.gpgsign", false).unwrap();

        std::fs::write(temp.path().join("metadata.json"), MANIFEST).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("metadata.json")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let project = Project::load(Some(temp.path()), None).unwrap();
        (temp, project)
    }

    fn run(project: &Project, graph_build: bool, target: &str, options: ActionOptions) -> Result<(), String> {
        let graph = standard_tasks(graph_build);
        let mut runner = TaskRunner::new(&graph);
        let mut actions = ReleaseActions::new(project, options);
        runner
            .run(&TaskId::new(target), &mut actions)
            .map(|_| ())
            .map_err(|e| format!("{:#}", anyhow::Error::from(e)))
    }

    #[test]
    fn test_bump_writes_manifest() {
        let (_temp, project) = seed_module();
        run(&project, true, "bump:minor", quiet()).unwrap();

        let metadata = project.metadata().unwrap();
        assert_eq!(metadata.version(), "1.3.0");
        let written = std::fs::read_to_string(project.manifest_path()).unwrap();
        assert_eq!(written, MANIFEST.replace("1.2.3", "1.3.0"));
    }

    #[test]
    fn test_full_bump_requires_target() {
        let (_temp, project) = seed_module();
        let err = run(&project, true, "bump:full", quiet()).unwrap_err();
        assert!(err.contains("Invalid bump target"), "{}", err);

        let options = ActionOptions {
            target_version: Some("2.0.0-rc1".to_string()),
            ..quiet()
        };
        run(&project, true, "bump:full", options).unwrap();
        assert_eq!(project.metadata().unwrap().version(), "2.0.0-rc1");
    }

    #[test]
    fn test_bump_commit_and_tag() {
        let (temp, project) = seed_module();
        run(&project, true, "bump_commit:patch", quiet()).unwrap();
        run(&project, true, "tag", quiet()).unwrap();

        let repo = Repository::open(temp.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap().trim(), "[blacksmith] Bump version to 1.2.4");
        assert!(repo.find_reference("refs/tags/1.2.4").is_ok());

        let err = run(&project, true, "tag", quiet()).unwrap_err();
        assert!(err.contains("Tag already exists"), "{}", err);
    }

    #[test]
    fn test_release_without_build_pushes_to_remote() {
        let (temp, project) = seed_module();
        let remote_dir = TempDir::new().unwrap();
        let bare = Repository::init_bare(remote_dir.path()).unwrap();
        Repository::open(temp.path())
            .unwrap()
            .remote("origin", &remote_dir.path().to_string_lossy())
            .unwrap();

        std::fs::create_dir(temp.path().join("pkg")).unwrap();
        run(&project, false, "release", quiet()).unwrap();

        assert!(!temp.path().join("pkg").exists());
        assert_eq!(project.metadata().unwrap().version(), "1.2.4");
        assert!(bare.find_reference("refs/tags/1.2.4").is_ok());
    }

    #[test]
    fn test_push_dry_run_requires_artifact() {
        let (temp, project) = seed_module();
        std::fs::write(temp.path().join(".puppetforge.yml"), "username: acme\npassword: secret\n").unwrap();
        let options = ActionOptions {
            dry_run: true,
            ..quiet()
        };

        let err = run(&project, false, "push", options.clone()).unwrap_err();
        assert!(err.contains("acme-ntp-*.tar.gz"), "{}", err);

        std::fs::create_dir(temp.path().join("pkg")).unwrap();
        std::fs::write(temp.path().join("pkg/acme-ntp-1.2.3.tar.gz"), b"tarball").unwrap();
        run(&project, false, "push", options).unwrap();
    }

    #[test]
    fn test_push_after_bump_finds_tarball_built_before_it() {
        let (temp, project) = seed_module();
        std::fs::write(temp.path().join(".puppetforge.yml"), "username: acme\npassword: secret\n").unwrap();
        std::fs::create_dir(temp.path().join("pkg")).unwrap();
        let built = temp.path().join("pkg/acme-ntp-1.2.3.tar.gz");
        std::fs::write(&built, b"tarball").unwrap();

        let graph = standard_tasks(false);
        let mut runner = TaskRunner::new(&graph);
        let options = ActionOptions {
            dry_run: true,
            ..quiet()
        };
        let mut actions = ReleaseActions::new(&project, options);
        for target in ["bump_commit:patch", "tag", "push"] {
            runner.run(&TaskId::new(target), &mut actions).unwrap();
        }

        assert_eq!(project.metadata().unwrap().version(), "1.2.4");
        assert!(built.exists());
    }

    #[test]
    fn test_unbound_task() {
        let (_temp, project) = seed_module();
        let mut actions = ReleaseActions::new(&project, quiet());
        let result = actions.execute(&TaskDefinition::new("deploy", "deploy"));
        assert!(matches!(result, Err(ActionError::Unbound(name)) if name == "deploy"));
    }

    #[test]
    fn test_bad_level() {
        let (_temp, project) = seed_module();
        let mut actions = ReleaseActions::new(&project, quiet());
        let result = actions.execute(&TaskDefinition::new("bump:huge", "bump"));
        assert!(matches!(
            result,
            Err(ActionError::Blacksmith(BlacksmithError::Version(VersionError::InvalidBumpLevel(_))))
        ));
    }
}
