//! `build-manifest.json` schema
//!
//! Written once into every deployed output directory:
//!
//! ```json
//! {
//!   "buildTime": "2026-10-19T08:15:30.123Z",
//!   "artifactSize": "412.7M",
//!   "buildDuration": { "packageBuild": 231, "packageDeploy": 48, "total": 291 }
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BUILD_MANIFEST_FILE: &str = "build-manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    /// ISO-8601 UTC timestamp with millisecond precision
    pub build_time: String,
    /// Human-readable size, or `"Unknown"` when it could not be measured
    pub artifact_size: String,
    pub build_duration: BuildDuration,
}

/// Whole seconds spent in each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDuration {
    pub package_build: u64,
    pub package_deploy: u64,
    pub total: u64,
}

impl BuildDuration {
    pub fn from_durations(package_build: Duration, package_deploy: Duration, total: Duration) -> Self {
        Self {
            package_build: package_build.as_secs(),
            package_deploy: package_deploy.as_secs(),
            total: total.as_secs(),
        }
    }
}

impl BuildManifest {
    pub fn new(built_at: DateTime<Utc>, artifact_size: String, build_duration: BuildDuration) -> Self {
        Self {
            build_time: built_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            artifact_size,
            build_duration,
        }
    }

    /// Writes the manifest into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(BUILD_MANIFEST_FILE);
        let mut rendered =
            serde_json::to_string_pretty(self).context("Failed to serialize build manifest")?;
        rendered.push('\n');
        fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(BUILD_MANIFEST_FILE);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}
