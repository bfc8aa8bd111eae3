//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { root } => {
                info!(root = %root, "Starting deploy build");
            }
            ProgressEvent::PhaseStarted { phase } => {
                info!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                info!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::PhaseSkipped { phase, reason } => {
                info!(phase = %phase, reason = %reason, "Phase skipped");
            }
            ProgressEvent::PhaseDegraded {
                phase,
                reason,
                duration,
            } => {
                warn!(
                    phase = %phase,
                    reason = %reason,
                    duration_ms = duration.as_millis(),
                    "Phase finished with a non-fatal failure"
                );
            }
            ProgressEvent::Completed { total_time } => {
                info!(total_time_ms = total_time.as_millis(), "Deploy build complete");
            }
            ProgressEvent::Failed { phase, error } => {
                error!(phase = %phase, error = %error, "Deploy build failed");
            }
        }
    }
}
