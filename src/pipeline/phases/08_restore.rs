use crate::config::CI_ENV;
use crate::manifest::restore_manifests;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use tracing::{info, warn};

/// Puts every backed-up manifest back in place
///
/// Runs only after a successful deploy. A failed deploy leaves the backups
/// on disk for manual recovery.
pub struct RestorePhase;

#[async_trait]
impl DeployPhase for RestorePhase {
    fn name(&self) -> &'static str {
        "restore"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        if !context.flags.backups_enabled() {
            return Ok(PhaseOutcome::Skipped(format!("{}=true", CI_ENV)));
        }

        let restored = restore_manifests(&context.backups)?;
        info!(count = restored, "Restored package manifests");
        context.backups.clear();
        context.manifests_restored = restored;

        let backup_root = context.backup_root();
        if backup_root.exists() {
            if let Err(e) = fs::remove_dir_all(&backup_root) {
                warn!(dir = %backup_root.display(), error = %e, "Failed to remove backup directory");
            }
        }

        Ok(PhaseOutcome::Completed)
    }
}
