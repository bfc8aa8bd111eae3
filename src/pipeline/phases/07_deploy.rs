use super::command_helper::run_checked;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use crate::pipeline::timer::StepTimer;
use crate::process::CommandSpec;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Runs `pnpm deploy` once per target with a production environment
pub struct DeployTargetsPhase;

impl DeployTargetsPhase {
    fn command_for(context: &DeployContext, filter: &str, output: &str) -> CommandSpec {
        CommandSpec::new(context.config.package_manager.clone(), &context.root)
            .arg(format!("--filter={}", filter))
            .args(context.config.deploy_args.iter().cloned())
            .arg(output)
            .envs(&context.config.deploy_env)
    }
}

#[async_trait]
impl DeployPhase for DeployTargetsPhase {
    fn name(&self) -> &'static str {
        "deploy"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        let timer = StepTimer::start();

        for target in &context.config.targets {
            let output = format!("./{}", target.output.display());
            let spec = Self::command_for(context, &target.filter, &output);

            run_checked(context, "deploy", &spec).await?;

            info!(target = %target.name, output = %output, "Deployed target");
        }

        context.package_deploy = Some(timer.stop());
        Ok(PhaseOutcome::Completed)
    }
}
