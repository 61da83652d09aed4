//! Exit codes for the CLI

use blacksmith_core::error::GitError;
use blacksmith_core::BlacksmithError;
use blacksmith_stores::StoreError;
use blacksmith_tasks::{DagError, RunError};

use crate::cli::actions::ActionError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration or credentials error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Manifest error
pub const MANIFEST_ERROR: i32 = 5;

/// Artifact lookup or upload error
pub const UPLOAD_ERROR: i32 = 6;

/// Unknown task or broken task graph
pub const TASK_ERROR: i32 = 7;

/// Exit code for the first recognised error in the chain
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(RunError::Graph(_)) = cause.downcast_ref::<RunError<ActionError>>() {
            return TASK_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<ActionError>() {
            return for_action(e);
        }
        if let Some(e) = cause.downcast_ref::<BlacksmithError>() {
            return for_blacksmith(e);
        }
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return for_store(e);
        }
        if cause.downcast_ref::<GitError>().is_some() {
            return GIT_ERROR;
        }
        if cause.downcast_ref::<DagError>().is_some() {
            return TASK_ERROR;
        }
    }
    ERROR
}

fn for_action(err: &ActionError) -> i32 {
    match err {
        ActionError::Blacksmith(e) => for_blacksmith(e),
        ActionError::Git(_) => GIT_ERROR,
        ActionError::Store(e) => for_store(e),
        ActionError::Unbound(_) => TASK_ERROR,
    }
}

fn for_blacksmith(err: &BlacksmithError) -> i32 {
    match err {
        BlacksmithError::Config(_) => CONFIG_ERROR,
        BlacksmithError::Git(_) => GIT_ERROR,
        BlacksmithError::Version(_) => VERSION_ERROR,
        BlacksmithError::Manifest(_) => MANIFEST_ERROR,
        _ => ERROR,
    }
}

fn for_store(err: &StoreError) -> i32 {
    match err {
        StoreError::Credentials(e) => for_blacksmith(e),
        _ => UPLOAD_ERROR,
    }
}
