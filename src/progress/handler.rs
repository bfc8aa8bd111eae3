//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a deploy run progresses
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started
    Started { root: String },

    /// Phase started
    PhaseStarted { phase: String },

    /// Phase finished normally
    PhaseComplete { phase: String, duration: Duration },

    /// Phase did nothing because its gate was closed
    PhaseSkipped { phase: String, reason: String },

    /// Phase hit a best-effort failure and the run continues
    PhaseDegraded {
        phase: String,
        reason: String,
        duration: Duration,
    },

    /// Run finished successfully
    Completed { total_time: Duration },

    /// Run aborted in a phase
    Failed { phase: String, error: String },
}

/// Trait for handling progress events during a deploy run
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}
