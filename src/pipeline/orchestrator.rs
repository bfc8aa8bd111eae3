use super::context::DeployContext;
use super::phase_trait::{DeployPhase, PhaseOutcome};
use super::phases::{
    BackupPhase, BuildPhase, CleanPhase, DeployTargetsPhase, LicensesPhase, ManifestPhase,
    MeasurePhase, PatchesPhase, RestorePhase, TestControllerPhase,
};
use super::summary::RunSummary;
use crate::progress::{ProgressEvent, ProgressHandler};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub struct PipelineOrchestrator {
    phases: Vec<Box<dyn DeployPhase>>,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self {
            phases: Self::default_phases(),
            progress_handler,
        }
    }

    pub fn with_phases(
        phases: Vec<Box<dyn DeployPhase>>,
        progress_handler: Option<Arc<dyn ProgressHandler>>,
    ) -> Self {
        Self {
            phases,
            progress_handler,
        }
    }

    pub fn default_phases() -> Vec<Box<dyn DeployPhase>> {
        vec![
            Box::new(CleanPhase),
            Box::new(BuildPhase),
            Box::new(LicensesPhase),
            Box::new(BackupPhase),
            Box::new(PatchesPhase),
            Box::new(TestControllerPhase),
            Box::new(DeployTargetsPhase),
            Box::new(RestorePhase),
            Box::new(MeasurePhase),
            Box::new(ManifestPhase),
        ]
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    /// Names the backup directory when the run stops with manifests still modified
    fn with_recovery_hint(context: &DeployContext, e: anyhow::Error) -> anyhow::Error {
        if context.backups.is_empty() {
            return e;
        }

        let backup_root = context.backup_root();
        error!(
            backup_dir = %backup_root.display(),
            count = context.backups.len(),
            "Package manifests are still modified; their originals remain in the backup directory"
        );
        e.context(format!(
            "original package manifests remain in {}",
            backup_root.display()
        ))
    }

    /// Runs every phase in order, stopping at the first fatal error
    pub async fn execute(&self, context: &mut DeployContext) -> Result<RunSummary> {
        let start = Instant::now();
        info!(root = %context.root.display(), "Starting deploy pipeline");
        context.config.validate()?;
        self.emit(ProgressEvent::Started {
            root: context.root.display().to_string(),
        });

        let mut degraded = Vec::new();

        for phase in &self.phases {
            let phase_name = phase.name();
            self.emit(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            let outcome = match phase.execute(context).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.emit(ProgressEvent::Failed {
                        phase: phase_name.to_string(),
                        error: format!("{:#}", e),
                    });
                    let e = Self::with_recovery_hint(context, e);
                    return Err(e.context(format!("Phase {} failed", phase_name)));
                }
            };

            match outcome {
                PhaseOutcome::Completed => self.emit(ProgressEvent::PhaseComplete {
                    phase: phase_name.to_string(),
                    duration: phase_start.elapsed(),
                }),
                PhaseOutcome::Skipped(reason) => self.emit(ProgressEvent::PhaseSkipped {
                    phase: phase_name.to_string(),
                    reason,
                }),
                PhaseOutcome::Degraded(reason) => {
                    degraded.push(phase_name.to_string());
                    self.emit(ProgressEvent::PhaseDegraded {
                        phase: phase_name.to_string(),
                        reason,
                        duration: phase_start.elapsed(),
                    });
                }
            }

            debug!("Phase {} complete", phase_name);
        }

        self.emit(ProgressEvent::Completed {
            total_time: start.elapsed(),
        });

        Ok(RunSummary::from_context(context, degraded))
    }
}
