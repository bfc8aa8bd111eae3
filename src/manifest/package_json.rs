//! `package.json` editing
//!
//! The document is kept as an order-preserving [`serde_json::Value`] so a
//! rewrite only changes the fields we touch. Output uses two-space
//! indentation and a trailing newline, like npm and pnpm themselves.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::DeployError;

/// Outcome of filtering `pnpm.patchedDependencies`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchFilterReport {
    pub kept: Vec<String>,
    pub removed: Vec<String>,
}

impl PatchFilterReport {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| DeployError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(DeployError::InvalidManifest {
                path: path.to_path_buf(),
                reason: "top-level value is not an object".to_string(),
            }
            .into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.document)
            .context("Failed to serialize package manifest")?;
        rendered.push('\n');
        Ok(rendered)
    }

    pub fn save(&self) -> Result<()> {
        let rendered = self.to_json_string()?;
        fs::write(&self.path, rendered)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Keys of `pnpm.patchedDependencies`, in document order
    pub fn patched_dependencies(&self) -> Vec<String> {
        self.document
            .get("pnpm")
            .and_then(|pnpm| pnpm.get("patchedDependencies"))
            .and_then(Value::as_object)
            .map(|patches| patches.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Drops every patch whose key does not start with one of `allowed_prefixes`
    ///
    /// A manifest without `pnpm.patchedDependencies` is left as is.
    pub fn retain_patches(&mut self, allowed_prefixes: &[String]) -> Result<PatchFilterReport> {
        let mut report = PatchFilterReport::default();

        let patches = match self
            .document
            .get_mut("pnpm")
            .and_then(|pnpm| pnpm.get_mut("patchedDependencies"))
        {
            Some(Value::Object(patches)) => patches,
            Some(_) => {
                return Err(DeployError::InvalidManifest {
                    path: self.path.clone(),
                    reason: "pnpm.patchedDependencies is not an object".to_string(),
                }
                .into())
            }
            None => return Ok(report),
        };

        let (kept, removed): (Vec<String>, Vec<String>) = patches
            .keys()
            .cloned()
            .partition(|key| is_allowed(key, allowed_prefixes));

        for key in &removed {
            patches.shift_remove(key);
        }

        report.kept = kept;
        report.removed = removed;
        Ok(report)
    }

    /// Appends `pattern` to the `files` array, creating the array if missing
    ///
    /// Returns `false` when the pattern was already present.
    pub fn append_files_pattern(&mut self, pattern: &str) -> Result<bool> {
        let files = self
            .document
            .entry("files")
            .or_insert_with(|| Value::Array(Vec::new()));

        let entries = match files {
            Value::Array(entries) => entries,
            _ => {
                return Err(DeployError::InvalidManifest {
                    path: self.path.clone(),
                    reason: "files is not an array".to_string(),
                }
                .into())
            }
        };

        if entries.iter().any(|entry| entry.as_str() == Some(pattern)) {
            return Ok(false);
        }

        entries.push(Value::String(pattern.to_string()));
        Ok(true)
    }

    pub fn files(&self) -> Vec<String> {
        self.document
            .get("files")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn is_allowed(key: &str, allowed_prefixes: &[String]) -> bool {
    allowed_prefixes
        .iter()
        .any(|prefix| key.starts_with(prefix.as_str()))
}
