//! Process-level configuration for prunekit
//!
//! Everything that used to be read ad hoc from the environment is read here,
//! once, at startup. The resulting [`DeployConfig`] is handed to the pipeline
//! by reference; no phase looks at the environment on its own.
//!
//! # Environment Variables
//!
//! - `CI`: when `"true"`, manifest backup and restore are skipped so shared
//!   CI workspaces are not touched twice - default: unset
//! - `INCLUDE_TEST_CONTROLLER`: when `"true"`, the end-to-end test controller
//!   stays in the shipped artifact - default: unset
//! - `PRUNEKIT_LOG_LEVEL`: Logging level - default: "info"
//! - `PRUNEKIT_LOG_JSON`: JSON log output (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use prunekit::DeployConfig;
//!
//! let config = DeployConfig::from_env();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";

pub const CI_ENV: &str = "CI";
pub const INCLUDE_TEST_CONTROLLER_ENV: &str = "INCLUDE_TEST_CONTROLLER";
pub const LOG_LEVEL_ENV: &str = "PRUNEKIT_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "PRUNEKIT_LOG_JSON";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to read the project configuration file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the project configuration file
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Flags controlling optional pipeline behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Running under CI; manifest backup/restore is skipped
    pub ci: bool,

    /// Keep the test controller in the deployed artifact
    pub include_test_controller: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit JSON logs
    pub log_json: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            ci: false,
            include_test_controller: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl DeployConfig {
    /// Loads flags from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads flags through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ci = lookup(CI_ENV).map(|v| is_true(&v)).unwrap_or(false);
        let include_test_controller = lookup(INCLUDE_TEST_CONTROLLER_ENV)
            .map(|v| is_true(&v))
            .unwrap_or(false);

        let log_level = lookup(LOG_LEVEL_ENV)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = lookup(LOG_JSON_ENV)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            ci,
            include_test_controller,
            log_level,
            log_json,
        }
    }

    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    pub fn with_test_controller(mut self, include: bool) -> Self {
        self.include_test_controller = include;
        self
    }

    /// Whether manifests are backed up before mutation and restored after deploy
    pub fn backups_enabled(&self) -> bool {
        !self.ci
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` for an unknown log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl fmt::Display for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deploy Configuration:")?;
        writeln!(f, "  CI: {}", self.ci)?;
        writeln!(f, "  Include Test Controller: {}", self.include_test_controller)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}
