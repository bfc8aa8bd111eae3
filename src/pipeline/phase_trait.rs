use super::context::DeployContext;
use anyhow::Result;
use async_trait::async_trait;

/// How a phase ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    Completed,
    /// The phase's gate was closed; nothing was done
    Skipped(String),
    /// A best-effort step failed; the run continues with degraded output
    Degraded(String),
}

#[async_trait]
pub trait DeployPhase: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome>;
}
