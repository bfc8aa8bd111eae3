use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error};

use super::commands::CliArgs;
use super::output::OutputFormatter;
use crate::config::DeployConfig;
use crate::pipeline::{DeployContext, PipelineConfig, PipelineOrchestrator, RunSummary};
use crate::process::{CommandRunner, SystemRunner};
use crate::progress::LoggingHandler;

/// Runs the deploy pipeline and returns the process exit code
pub async fn handle_run(args: &CliArgs, flags: DeployConfig) -> i32 {
    match run(args, flags, Arc::new(SystemRunner)).await {
        Ok(summary) => {
            let formatter = OutputFormatter::new(args.format.into());
            match formatter.format(&summary) {
                Ok(rendered) => {
                    println!("{}", rendered);
                    0
                }
                Err(e) => {
                    error!("Failed to format summary: {:#}", e);
                    1
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Loads configuration for `args` and runs the pipeline with `runner`
pub async fn run(
    args: &CliArgs,
    flags: DeployConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<RunSummary> {
    flags.validate()?;

    let root = resolve_root(args.root.clone())?;
    let config = PipelineConfig::load(&root)?;
    debug!(root = %root.display(), targets = config.targets.len(), "Loaded pipeline configuration");

    let mut context = DeployContext::new(root, config, flags, runner);
    let orchestrator = PipelineOrchestrator::new(Some(Arc::new(LoggingHandler)));
    orchestrator.execute(&mut context).await
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => path,
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Monorepo root not found: {}", root.display()))
}
