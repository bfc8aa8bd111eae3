use crate::config::CI_ENV;
use crate::manifest::{backup_manifests, find_package_manifests};
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Copies every package manifest aside before any of them is mutated
pub struct BackupPhase;

#[async_trait]
impl DeployPhase for BackupPhase {
    fn name(&self) -> &'static str {
        "backup"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        if !context.flags.backups_enabled() {
            return Ok(PhaseOutcome::Skipped(format!("{}=true", CI_ENV)));
        }

        let manifests = find_package_manifests(&context.root, &context.config.manifest_exclusions())?;
        let backups = backup_manifests(&context.root, &context.backup_root(), &manifests)?;

        info!(
            count = backups.len(),
            backup_dir = %context.backup_root().display(),
            "Backed up package manifests"
        );
        context.backups = backups;

        Ok(PhaseOutcome::Completed)
    }
}
