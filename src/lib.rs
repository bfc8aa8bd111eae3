//! prunekit - pruned production deployments for pnpm monorepos
//!
//! This library drives a linear deploy pipeline over a monorepo checkout:
//! install and build, generate the license report, strip development-only
//! manifest metadata, run `pnpm deploy` once per target, restore the
//! manifests, and record a `build-manifest.json` with artifact size and
//! timings in every output directory.
//!
//! # Example Usage
//!
//! ```no_run
//! use prunekit::{DeployConfig, DeployContext, PipelineConfig, PipelineOrchestrator, SystemRunner};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let root = PathBuf::from("/srv/monorepo");
//! let config = PipelineConfig::load(&root)?;
//! let mut context = DeployContext::new(root, config, DeployConfig::from_env(), Arc::new(SystemRunner));
//!
//! let summary = PipelineOrchestrator::new(None).execute(&mut context).await?;
//! for target in &summary.targets {
//!     println!("{}: {}", target.name, target.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`pipeline`]: phases, context and orchestrator
//! - [`manifest`]: `package.json` discovery, backup and editing
//! - [`output`]: build manifest schema and artifact sizing
//! - [`process`]: external command execution

pub mod cli;
pub mod config;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod util;

pub use config::{ConfigError, DeployConfig};
pub use output::{format_size, BuildDuration, BuildManifest};
pub use pipeline::{
    DeployContext, DeployError, PipelineConfig, PipelineOrchestrator, RunSummary,
};
pub use process::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
