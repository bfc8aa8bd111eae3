use std::time::{Duration, Instant};

/// Start point of a measured step
///
/// Timers are plain values: start one, carry it where the step ends, stop it.
#[derive(Debug, Clone, Copy)]
pub struct StepTimer {
    started: Instant,
}

impl StepTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}
