use std::path::PathBuf;
use thiserror::Error;

/// Fatal deploy failures
///
/// Anything surfaced as a `DeployError` aborts the run with exit code 1.
/// Best-effort steps never produce one.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("{step} failed: `{command}` exited with {status}")]
    CommandFailed {
        step: &'static str,
        command: String,
        status: String,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Manifest not found: {0}")]
    MissingManifest(PathBuf),

    #[error("Backup not found: {0}")]
    MissingBackup(PathBuf),

    #[error("Refusing to modify {0}: it was not backed up and could not be restored")]
    NotBackedUp(PathBuf),

    #[error("Backups from an interrupted run exist in {0}; restore or remove them before deploying again")]
    StaleBackups(PathBuf),
}
