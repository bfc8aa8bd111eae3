use crate::config::INCLUDE_TEST_CONTROLLER_ENV;
use crate::manifest::PackageManifest;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Keeps the end-to-end test controller out of the shipped artifact
///
/// Appends an exclusion glob to the owning package's `files` list, which
/// `pnpm deploy` honors when copying the package.
pub struct TestControllerPhase;

#[async_trait]
impl DeployPhase for TestControllerPhase {
    fn name(&self) -> &'static str {
        "test-controller"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        if context.flags.include_test_controller {
            return Ok(PhaseOutcome::Skipped(format!(
                "{}=true",
                INCLUDE_TEST_CONTROLLER_ENV
            )));
        }

        let path = context.resolve(&context.config.test_controller.manifest);
        if !path.is_file() {
            let reason = format!("package manifest not found at {}", path.display());
            warn!(reason = %reason, "Cannot exclude test controller");
            return Ok(PhaseOutcome::Degraded(reason));
        }

        context.ensure_backed_up(&path)?;

        let pattern = &context.config.test_controller.pattern;
        let mut manifest = PackageManifest::load(&path)?;
        if manifest.append_files_pattern(pattern)? {
            manifest.save()?;
            info!(manifest = %path.display(), pattern = %pattern, "Excluded test controller from artifact");
        } else {
            debug!(pattern = %pattern, "Exclusion already present");
        }

        context.test_controller_excluded = true;
        Ok(PhaseOutcome::Completed)
    }
}
