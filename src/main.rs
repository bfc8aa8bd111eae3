use prunekit::cli::handlers::handle_run;
use prunekit::cli::CliArgs;
use prunekit::util::logging::{init_logging, parse_level, LoggingConfig};
use prunekit::{DeployConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let flags = DeployConfig::from_env();

    let mut logging = LoggingConfig::from_flags(&flags);
    if let Some(level) = level_from_args(&args) {
        logging = logging.with_level(level);
    }
    init_logging(&logging);

    debug!("prunekit v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", flags);

    let exit_code = handle_run(&args, flags).await;

    std::process::exit(exit_code);
}

/// Command-line verbosity, which wins over `PRUNEKIT_LOG_LEVEL`
fn level_from_args(args: &CliArgs) -> Option<Level> {
    if let Some(level) = args.log_level.as_deref().and_then(parse_level) {
        Some(level)
    } else if args.verbose {
        Some(Level::DEBUG)
    } else if args.quiet {
        Some(Level::ERROR)
    } else {
        None
    }
}
