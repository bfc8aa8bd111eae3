//! Project layout configuration
//!
//! Read from `prunekit.toml` at the monorepo root when present. Every field
//! has a default matching a pnpm monorepo with an application package and a
//! task-runner package, so most projects need no file at all.
//!
//! ```toml
//! package_manager = "pnpm"
//! patch_allow_list = ["pdfjs-dist", "pkce-challenge", "bull"]
//!
//! [[targets]]
//! name = "application"
//! filter = "n8n"
//! output = "compiled"
//! include_license = true
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::ConfigError;

pub const CONFIG_FILE: &str = "prunekit.toml";

/// A `pnpm deploy` output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployTarget {
    /// Label used in logs and the run summary
    pub name: String,
    /// Workspace package selector passed as `--filter=<filter>`
    pub filter: String,
    /// Output directory, relative to the monorepo root
    pub output: PathBuf,
    /// Copy the third-party license report into this output
    #[serde(default)]
    pub include_license: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LicenseConfig {
    /// Command (program followed by arguments) that writes the report
    pub command: Vec<String>,
    /// Report file produced by `command`, relative to the monorepo root
    pub report: PathBuf,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "node".to_string(),
                "scripts/generate-third-party-licenses.mjs".to_string(),
            ],
            report: PathBuf::from("THIRD_PARTY_LICENSES.md"),
        }
    }
}

/// Exclusion applied when the end-to-end test controller must not ship
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TestControllerConfig {
    /// Package manifest whose `files` list receives the pattern
    pub manifest: PathBuf,
    pub pattern: String,
}

impl Default for TestControllerConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("packages/cli/package.json"),
            pattern: "!dist/**/e2e.*".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineConfig {
    pub package_manager: String,
    pub install_args: Vec<String>,
    pub build_args: Vec<String>,
    /// Arguments between `--filter=<filter>` and the output path
    pub deploy_args: Vec<String>,
    /// Environment added to every deploy invocation
    pub deploy_env: BTreeMap<String, String>,
    /// Patch name prefixes kept in the root manifest
    pub patch_allow_list: Vec<String>,
    /// Directory names (or root-relative paths) never searched for manifests
    pub excluded_dirs: Vec<String>,
    /// Where manifest backups are kept, relative to the monorepo root
    pub backup_dir: PathBuf,
    pub license: LicenseConfig,
    pub test_controller: TestControllerConfig,
    pub targets: Vec<DeployTarget>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let deploy_env = [("NODE_ENV", "production"), ("DOCKER_BUILD", "true")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            package_manager: "pnpm".to_string(),
            install_args: vec!["install".to_string(), "--frozen-lockfile".to_string()],
            build_args: vec!["build".to_string()],
            deploy_args: vec![
                "--prod".to_string(),
                "--legacy".to_string(),
                "deploy".to_string(),
                "--no-optional".to_string(),
            ],
            deploy_env,
            patch_allow_list: vec![
                "pdfjs-dist".to_string(),
                "pkce-challenge".to_string(),
                "bull".to_string(),
            ],
            excluded_dirs: vec![
                "node_modules".to_string(),
                "dist".to_string(),
                ".git".to_string(),
            ],
            backup_dir: PathBuf::from(".prunekit/backups"),
            license: LicenseConfig::default(),
            test_controller: TestControllerConfig::default(),
            targets: vec![
                DeployTarget {
                    name: "application".to_string(),
                    filter: "n8n".to_string(),
                    output: PathBuf::from("compiled"),
                    include_license: true,
                },
                DeployTarget {
                    name: "task-runner".to_string(),
                    filter: "@n8n/task-runner".to_string(),
                    output: PathBuf::from("dist/task-runner-javascript"),
                    include_license: false,
                },
            ],
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `prunekit.toml` from `root`, or the defaults when it does not exist
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, &path)
    }

    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_package_manager(mut self, program: impl Into<String>) -> Self {
        self.package_manager = program.into();
        self
    }

    pub fn with_targets(mut self, targets: Vec<DeployTarget>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_license_command(mut self, command: Vec<String>) -> Self {
        self.license.command = command;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_manager.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "package_manager must not be empty".to_string(),
            ));
        }
        if self.targets.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one deploy target is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for target in &self.targets {
            if !names.insert(target.name.as_str()) {
                return Err(ConfigError::ValidationFailed(format!(
                    "duplicate target name: {}",
                    target.name
                )));
            }
            if !is_plain_relative(&target.output) {
                return Err(ConfigError::ValidationFailed(format!(
                    "target {} output must be a relative path inside the root: {}",
                    target.name,
                    target.output.display()
                )));
            }
        }

        for (i, first) in self.targets.iter().enumerate() {
            let first_output = normalized(&first.output);
            for second in &self.targets[i + 1..] {
                let second_output = normalized(&second.output);
                if first_output.starts_with(&second_output)
                    || second_output.starts_with(&first_output)
                {
                    return Err(ConfigError::ValidationFailed(format!(
                        "targets {} and {} have overlapping outputs: {} and {}",
                        first.name,
                        second.name,
                        first.output.display(),
                        second.output.display()
                    )));
                }
            }
        }

        for (label, path) in [
            ("backup_dir", &self.backup_dir),
            ("license.report", &self.license.report),
            ("test_controller.manifest", &self.test_controller.manifest),
        ] {
            if !is_plain_relative(path) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be a relative path inside the root: {}",
                    label,
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Directories skipped when looking for manifests: the configured
    /// exclusions plus the backup directory and every target output
    pub fn manifest_exclusions(&self) -> Vec<String> {
        let mut excluded = self.excluded_dirs.clone();
        excluded.push(self.backup_dir.to_string_lossy().into_owned());
        for target in &self.targets {
            excluded.push(target.output.to_string_lossy().into_owned());
        }
        excluded
    }
}

/// A relative path naming something strictly below the root
///
/// `.`, `./` and the empty path name the root itself and are rejected.
fn is_plain_relative(path: &Path) -> bool {
    let mut named = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    named
}

/// Path without `.` components, for comparing configured outputs
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}
