//! The deploy pipeline: phases, their shared context, and the orchestrator

pub mod config;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod summary;
pub mod timer;

pub use config::{DeployTarget, PipelineConfig};
pub use context::{DeployContext, TargetArtifact};
pub use error::DeployError;
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::{DeployPhase, PhaseOutcome};
pub use summary::{RunSummary, TargetSummary};
pub use timer::StepTimer;
