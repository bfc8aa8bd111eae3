//! Structured logging setup for prunekit
//!
//! Logs always go to stderr so the run summary on stdout stays
//! machine-readable. `RUST_LOG`, when set, replaces the configured level.
//!
//! ```no_run
//! use prunekit::util::logging::{init_logging, LoggingConfig};
//! use prunekit::DeployConfig;
//! use tracing::info;
//!
//! init_logging(&LoggingConfig::from_flags(&DeployConfig::from_env()));
//! info!(root = "/srv/monorepo", "Starting deploy");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::DeployConfig;

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,

    /// One JSON object per line, for CI log collectors
    pub use_json: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Level and format from the process flags
    ///
    /// JSON output also carries source locations.
    pub fn from_flags(flags: &DeployConfig) -> Self {
        Self {
            level: parse_level(&flags.log_level).unwrap_or(Level::INFO),
            use_json: flags.log_json,
            include_location: flags.log_json,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    fn directive(&self) -> String {
        format!("prunekit={}", self.level)
    }
}

/// Parses a level name, ignoring case
///
/// ```
/// use prunekit::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("loud"), None);
/// ```
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber; only the first call has an effect
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = config.directive().parse() {
                filter = filter.add_directive(directive);
            }
        }

        let layer = if config.use_json {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed()
        };

        tracing_subscriber::registry().with(layer).with(filter).init();
    });
}
