use crate::pipeline::context::DeployContext;
use crate::pipeline::DeployError;
use crate::process::{CommandOutcome, CommandSpec};
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info};

/// A package-manager command rooted at the monorepo
pub fn package_manager_command(context: &DeployContext, args: &[String]) -> CommandSpec {
    CommandSpec::new(context.config.package_manager.clone(), &context.root).args(args.iter().cloned())
}

/// Runs `spec` and returns its outcome without judging it
pub async fn run_command(context: &DeployContext, step: &str, spec: &CommandSpec) -> Result<CommandOutcome> {
    let start = Instant::now();
    info!(step, command = %spec, "Running command");

    let outcome = context.runner.run(spec).await?;

    debug!(
        step,
        success = outcome.success,
        elapsed_ms = start.elapsed().as_millis(),
        "Command finished"
    );
    Ok(outcome)
}

/// Runs `spec` and turns a non-zero exit into [`DeployError::CommandFailed`]
pub async fn run_checked(context: &DeployContext, step: &'static str, spec: &CommandSpec) -> Result<()> {
    let outcome = run_command(context, step, spec).await?;
    if outcome.success {
        Ok(())
    } else {
        Err(DeployError::CommandFailed {
            step,
            command: spec.to_string(),
            status: outcome.describe(),
        }
        .into())
    }
}
