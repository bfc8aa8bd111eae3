//! Deploy run context
//!
//! Owns the inputs of a run (root, configuration, command runner) and
//! accumulates what each phase produces for the phases after it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::DeployConfig;
use crate::manifest::ManifestBackup;
use crate::output::BuildDuration;
use crate::process::CommandRunner;

use super::config::{DeployTarget, PipelineConfig};
use super::error::DeployError;
use super::timer::StepTimer;

/// What the run produced for one deploy target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetArtifact {
    pub name: String,
    pub output: PathBuf,
    pub size: String,
    pub manifest_path: Option<PathBuf>,
    pub license_copied: bool,
}

pub struct DeployContext {
    pub root: PathBuf,
    pub config: PipelineConfig,
    pub flags: DeployConfig,
    pub runner: Arc<dyn CommandRunner>,

    /// Started when the run begins; stopped when manifests are written
    pub run_timer: StepTimer,
    pub package_build: Option<Duration>,
    pub package_deploy: Option<Duration>,
    /// Run time recorded when the build manifests were written
    pub total: Option<Duration>,

    /// License report path, set when generation succeeded
    pub license_report: Option<PathBuf>,
    /// Manifests awaiting restore; emptied once they are back in place
    pub backups: Vec<ManifestBackup>,
    pub manifests_restored: usize,
    pub removed_patches: Vec<String>,
    pub test_controller_excluded: bool,
    pub artifacts: Vec<TargetArtifact>,
}

impl DeployContext {
    pub fn new(
        root: PathBuf,
        config: PipelineConfig,
        flags: DeployConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            root,
            config,
            flags,
            runner,
            run_timer: StepTimer::start(),
            package_build: None,
            package_deploy: None,
            total: None,
            license_report: None,
            backups: Vec::new(),
            manifests_restored: 0,
            removed_patches: Vec::new(),
            test_controller_excluded: false,
            artifacts: Vec::new(),
        }
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn output_dir(&self, target: &DeployTarget) -> PathBuf {
        self.resolve(&target.output)
    }

    pub fn backup_root(&self) -> PathBuf {
        self.resolve(&self.config.backup_dir)
    }

    pub fn root_manifest(&self) -> PathBuf {
        self.root.join(crate::manifest::PACKAGE_JSON)
    }

    /// Fails unless `path` can be restored after the run
    ///
    /// With backups disabled nothing is restored, so any path is accepted.
    pub fn ensure_backed_up(&self, path: &Path) -> Result<(), DeployError> {
        if !self.flags.backups_enabled() || self.backups.iter().any(|b| b.original == path) {
            Ok(())
        } else {
            Err(DeployError::NotBackedUp(path.to_path_buf()))
        }
    }

    /// Stage durations as recorded in `build-manifest.json`
    ///
    /// Until the manifests are written, `total` is the time elapsed so far.
    pub fn build_duration(&self) -> BuildDuration {
        BuildDuration::from_durations(
            self.package_build.unwrap_or_default(),
            self.package_deploy.unwrap_or_default(),
            self.total.unwrap_or_else(|| self.run_timer.elapsed()),
        )
    }
}
