use serde::Serialize;

use super::context::DeployContext;
use crate::output::BuildDuration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSummary {
    pub name: String,
    pub output: String,
    pub size: String,
    pub license_copied: bool,
}

/// What a completed run did, for the CLI to print
///
/// Serialized in camelCase, like `build-manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub root: String,
    pub targets: Vec<TargetSummary>,
    pub build_duration: BuildDuration,
    pub backups_skipped: bool,
    pub manifests_restored: usize,
    pub removed_patches: Vec<String>,
    pub test_controller_excluded: bool,
    pub license_report: Option<String>,
    /// Phases that finished with a non-fatal failure
    pub degraded_phases: Vec<String>,
}

impl RunSummary {
    pub fn from_context(context: &DeployContext, degraded_phases: Vec<String>) -> Self {
        let targets = context
            .artifacts
            .iter()
            .map(|artifact| TargetSummary {
                name: artifact.name.clone(),
                output: artifact.output.display().to_string(),
                size: artifact.size.clone(),
                license_copied: artifact.license_copied,
            })
            .collect();

        Self {
            root: context.root.display().to_string(),
            targets,
            build_duration: context.build_duration(),
            backups_skipped: !context.flags.backups_enabled(),
            manifests_restored: context.manifests_restored,
            removed_patches: context.removed_patches.clone(),
            test_controller_excluded: context.test_controller_excluded,
            license_report: context
                .license_report
                .as_ref()
                .map(|p| p.display().to_string()),
            degraded_phases,
        }
    }
}
