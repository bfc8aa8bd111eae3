use crate::output::{artifact_size, UNKNOWN_SIZE};
use crate::pipeline::context::{DeployContext, TargetArtifact};
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Measures the size of every deployed output directory
pub struct MeasurePhase;

#[async_trait]
impl DeployPhase for MeasurePhase {
    fn name(&self) -> &'static str {
        "measure"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        let mut artifacts = Vec::with_capacity(context.config.targets.len());
        let mut unmeasured = Vec::new();

        for target in &context.config.targets {
            let output = context.output_dir(target);
            let size = artifact_size(&output);
            if size == UNKNOWN_SIZE {
                unmeasured.push(target.name.clone());
            } else {
                info!(target = %target.name, size = %size, "Measured artifact");
            }

            artifacts.push(TargetArtifact {
                name: target.name.clone(),
                output,
                size,
                manifest_path: None,
                license_copied: false,
            });
        }

        context.artifacts = artifacts;

        if unmeasured.is_empty() {
            Ok(PhaseOutcome::Completed)
        } else {
            Ok(PhaseOutcome::Degraded(format!(
                "could not measure: {}",
                unmeasured.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployConfig;
    use crate::pipeline::phases::test_support::{context_for, monorepo, ScriptedRunner};
    use std::fs;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_measures_each_target() {
        let dir = monorepo();
        fs::create_dir_all(dir.path().join("compiled")).unwrap();
        fs::write(dir.path().join("compiled/index.js"), vec![b'x'; 1536]).unwrap();
        fs::create_dir_all(dir.path().join("dist/task-runner-javascript")).unwrap();

        let mut context = context_for(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default());
        let outcome = MeasurePhase.execute(&mut context).await.unwrap();

        assert_eq!(outcome, PhaseOutcome::Completed);
        let sizes: Vec<_> = context.artifacts.iter().map(|a| a.size.as_str()).collect();
        assert_eq!(sizes, vec!["1.5K", "0.0B"]);
    }

    #[tokio::test]
    async fn test_missing_output_reports_unknown() {
        let dir = monorepo();
        fs::create_dir_all(dir.path().join("compiled")).unwrap();

        let mut context = context_for(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default());
        let outcome = MeasurePhase.execute(&mut context).await.unwrap();

        assert!(matches!(outcome, PhaseOutcome::Degraded(ref r) if r.contains("task-runner")));
        assert_eq!(context.artifacts[1].size, UNKNOWN_SIZE);
    }
}
