use super::command_helper::run_command;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use crate::process::CommandSpec;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Generates the third-party license report
///
/// Best-effort: a failing or missing generator only degrades the output.
pub struct LicensesPhase;

#[async_trait]
impl DeployPhase for LicensesPhase {
    fn name(&self) -> &'static str {
        "licenses"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        let Some((program, args)) = context.config.license.command.split_first() else {
            return Ok(PhaseOutcome::Skipped(
                "no license command configured".to_string(),
            ));
        };

        let spec = CommandSpec::new(program.clone(), &context.root).args(args.iter().cloned());

        let reason = match run_command(context, "licenses", &spec).await {
            Ok(outcome) if outcome.success => None,
            Ok(outcome) => Some(format!("`{}` exited with {}", spec, outcome.describe())),
            Err(e) => Some(format!("{:#}", e)),
        };

        if let Some(reason) = reason {
            warn!(reason = %reason, "License report generation failed, continuing without it");
            return Ok(PhaseOutcome::Degraded(reason));
        }

        let report = context.resolve(&context.config.license.report);
        if !report.is_file() {
            let reason = format!("license report not found at {}", report.display());
            warn!(reason = %reason, "License generator produced no report");
            return Ok(PhaseOutcome::Degraded(reason));
        }

        info!(report = %report.display(), "License report generated");
        context.license_report = Some(report);
        Ok(PhaseOutcome::Completed)
    }
}
