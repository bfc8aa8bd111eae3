use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Removes output directories left by a previous run
pub struct CleanPhase;

#[async_trait]
impl DeployPhase for CleanPhase {
    fn name(&self) -> &'static str {
        "clean"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        for target in &context.config.targets {
            let dir = context.output_dir(target);
            match fs::remove_dir_all(&dir) {
                Ok(()) => info!(target = %target.name, dir = %dir.display(), "Removed previous output"),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(dir = %dir.display(), "No previous output to remove");
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove {}", dir.display()))
                }
            }
        }

        Ok(PhaseOutcome::Completed)
    }
}
