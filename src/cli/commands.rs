use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Build pruned production deployments from a pnpm monorepo
#[derive(Parser, Debug)]
#[command(
    name = "prunekit",
    about = "Build pruned production deployments from a pnpm monorepo",
    version,
    long_about = "prunekit installs and builds a pnpm monorepo, strips development-only \
                  manifest metadata, runs `pnpm deploy` for each configured target and \
                  writes a build-manifest.json into every output.\n\n\
                  Behavior is controlled by environment variables:\n  \
                  CI=true                       skip manifest backup and restore\n  \
                  INCLUDE_TEST_CONTROLLER=true  keep the e2e test controller in the artifact\n\n\
                  Project layout is read from prunekit.toml at the monorepo root when present."
)]
pub struct CliArgs {
    #[arg(
        value_name = "ROOT",
        help = "Monorepo root (defaults to current directory)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Format of the run summary printed on success"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Set logging level (overrides PRUNEKIT_LOG_LEVEL)"
    )]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
