use crate::output::BuildManifest;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::fs;
use tracing::{info, warn};

/// Writes `build-manifest.json` into each output and ships the license report
pub struct ManifestPhase;

#[async_trait]
impl DeployPhase for ManifestPhase {
    fn name(&self) -> &'static str {
        "manifest"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        context.total = Some(context.run_timer.elapsed());
        let duration = context.build_duration();
        let built_at = Utc::now();

        let report = context.resolve(&context.config.license.report);
        let report_name = report.file_name().map(|n| n.to_os_string());
        let mut degraded = Vec::new();

        for (target, artifact) in context.config.targets.iter().zip(context.artifacts.iter_mut()) {
            fs::create_dir_all(&artifact.output)
                .with_context(|| format!("Failed to create {}", artifact.output.display()))?;

            let manifest = BuildManifest::new(built_at, artifact.size.clone(), duration);
            let path = manifest.write_to(&artifact.output)?;
            info!(target = %artifact.name, manifest = %path.display(), "Wrote build manifest");
            artifact.manifest_path = Some(path);

            if !target.include_license || !report.is_file() {
                continue;
            }
            let Some(name) = &report_name else { continue };

            let destination = artifact.output.join(name);
            match fs::copy(&report, &destination) {
                Ok(_) => {
                    artifact.license_copied = true;
                    info!(target = %artifact.name, "Copied license report");
                }
                Err(e) => {
                    warn!(
                        target = %artifact.name,
                        error = %e,
                        "Failed to copy license report"
                    );
                    degraded.push(format!("license copy failed for {}", artifact.name));
                }
            }
        }

        if degraded.is_empty() {
            Ok(PhaseOutcome::Completed)
        } else {
            Ok(PhaseOutcome::Degraded(degraded.join("; ")))
        }
    }
}
