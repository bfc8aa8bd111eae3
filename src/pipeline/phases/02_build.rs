use super::command_helper::{package_manager_command, run_checked};
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use crate::pipeline::timer::StepTimer;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Installs dependencies from the lockfile and builds every package
///
/// Any failure here is fatal; nothing after this phase runs.
pub struct BuildPhase;

#[async_trait]
impl DeployPhase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        let timer = StepTimer::start();

        let install = package_manager_command(context, &context.config.install_args);
        run_checked(context, "install", &install).await?;

        let build = package_manager_command(context, &context.config.build_args);
        run_checked(context, "build", &build).await?;

        let elapsed = timer.stop();
        info!(elapsed_secs = elapsed.as_secs(), "Install and build finished");
        context.package_build = Some(elapsed);

        Ok(PhaseOutcome::Completed)
    }
}
