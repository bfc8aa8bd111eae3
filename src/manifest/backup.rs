//! Reversible manifest backups
//!
//! Backups mirror the monorepo layout under a single directory at the root
//! (`.prunekit/backups` by default) so none of them land inside a package
//! that `pnpm deploy` copies. Restoring renames each backup over its original.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::pipeline::DeployError;

/// One backed-up manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBackup {
    pub original: PathBuf,
    pub backup: PathBuf,
}

/// Copies every manifest into `backup_root`, preserving paths relative to `root`
///
/// Fails with [`DeployError::StaleBackups`] if `backup_root` already holds
/// files; those are left over from an interrupted run and still contain the
/// only unmodified copies.
pub fn backup_manifests(
    root: &Path,
    backup_root: &Path,
    manifests: &[PathBuf],
) -> Result<Vec<ManifestBackup>> {
    if has_files(backup_root)? {
        return Err(DeployError::StaleBackups(backup_root.to_path_buf()).into());
    }

    let mut backups = Vec::with_capacity(manifests.len());

    for original in manifests {
        let relative = original.strip_prefix(root).with_context(|| {
            format!(
                "{} is outside the monorepo root {}",
                original.display(),
                root.display()
            )
        })?;
        let backup = backup_root.join(relative);

        if let Some(parent) = backup.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(original, &backup).with_context(|| {
            format!(
                "Failed to back up {} to {}",
                original.display(),
                backup.display()
            )
        })?;

        debug!(original = %original.display(), backup = %backup.display(), "Backed up manifest");
        backups.push(ManifestBackup {
            original: original.clone(),
            backup,
        });
    }

    Ok(backups)
}

/// Moves each backup back over its original
pub fn restore_manifests(backups: &[ManifestBackup]) -> Result<usize> {
    for entry in backups {
        if !entry.backup.is_file() {
            return Err(DeployError::MissingBackup(entry.backup.clone()).into());
        }
        fs::rename(&entry.backup, &entry.original).with_context(|| {
            format!(
                "Failed to restore {} from {}",
                entry.original.display(),
                entry.backup.display()
            )
        })?;
        debug!(original = %entry.original.display(), "Restored manifest");
    }

    Ok(backups.len())
}

/// Whether any regular file exists below `dir`
///
/// Empty directories left by a partial cleanup do not count.
fn has_files(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }

    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .build()
    {
        let entry = result.with_context(|| format!("Failed to inspect {}", dir.display()))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            return Ok(true);
        }
    }

    Ok(false)
}
