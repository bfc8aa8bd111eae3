use anyhow::{Context, Result};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use super::PACKAGE_JSON;

/// Finds every `package.json` below `root`, skipping `excluded_dirs`
///
/// Excluded entries are matched as directory names at any depth
/// (`node_modules`) or as root-relative paths (`dist/task-runner-javascript`).
/// The result is sorted so backups and logs are deterministic.
pub fn find_package_manifests(root: &Path, excluded_dirs: &[String]) -> Result<Vec<PathBuf>> {
    let mut override_builder = OverrideBuilder::new(root);
    for excluded in excluded_dirs {
        let pattern = excluded.trim_matches('/');
        if pattern.is_empty() {
            continue;
        }
        let glob = if pattern.contains('/') {
            format!("!/{}/", pattern)
        } else {
            format!("!{}/", pattern)
        };
        override_builder
            .add(&glob)
            .with_context(|| format!("Invalid exclusion pattern: {}", excluded))?;
    }
    let overrides = override_builder
        .build()
        .context("Failed to build manifest exclusion overrides")?;

    let mut manifests = Vec::new();

    for result in WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .overrides(overrides)
        .build()
    {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && entry.file_name() == PACKAGE_JSON {
            trace!(path = %entry.path().display(), "Found package manifest");
            manifests.push(entry.into_path());
        }
    }

    manifests.sort();
    Ok(manifests)
}
