//! Artifact size measurement

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::Path;
use tracing::warn;

pub const UNKNOWN_SIZE: &str = "Unknown";

const UNITS: [&str; 4] = ["B", "K", "M", "G"];

/// Formats a byte count with one decimal place and a single-letter unit
///
/// ```
/// use prunekit::output::format_size;
///
/// assert_eq!(format_size(0), "0.0B");
/// assert_eq!(format_size(1536), "1.5K");
/// assert_eq!(format_size(1_048_576), "1.0M");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", size, UNITS[unit])
}

/// Total size in bytes of the regular files below `dir`
///
/// Symlinks are not followed, so pnpm's linked `node_modules` layout is
/// counted once.
pub fn dir_size(dir: &Path) -> Result<u64> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut total = 0u64;
    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .build()
    {
        let entry = result.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            total += metadata.len();
        }
    }

    Ok(total)
}

/// Formatted size of `dir`, or [`UNKNOWN_SIZE`] if it cannot be measured
pub fn artifact_size(dir: &Path) -> String {
    match dir_size(dir) {
        Ok(bytes) => format_size(bytes),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to measure artifact size");
            UNKNOWN_SIZE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use yare::parameterized;

    #[parameterized(
        zero = { 0, "0.0B" },
        bytes = { 1023, "1023.0B" },
        one_kib = { 1024, "1.0K" },
        one_and_half_kib = { 1536, "1.5K" },
        one_mib = { 1_048_576, "1.0M" },
        one_gib = { 1_073_741_824, "1.0G" },
        beyond_largest_unit = { 2 * 1024 * 1_073_741_824, "2048.0G" },
    )]
    fn test_format_size(bytes: u64, expected: &str) {
        assert_eq!(format_size(bytes), expected);
    }

    #[test]
    fn test_dir_size_sums_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), vec![0u8; 1000]).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/.pnpm/x")).unwrap();
        fs::write(dir.path().join("node_modules/.pnpm/x/index.js"), vec![0u8; 536]).unwrap();
        fs::write(dir.path().join(".npmrc"), b"").unwrap();

        assert_eq!(dir_size(dir.path()).unwrap(), 1536);
        assert_eq!(artifact_size(dir.path()), "1.5K");
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_size_does_not_follow_symlinks() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("big.bin"), vec![0u8; 4096]).unwrap();
        fs::write(dir.path().join("small.bin"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        assert_eq!(dir_size(dir.path()).unwrap(), 10);
    }

    #[test]
    fn test_missing_dir_is_unknown() {
        let dir = TempDir::new().unwrap();
        assert!(dir_size(&dir.path().join("missing")).is_err());
        assert_eq!(artifact_size(&dir.path().join("missing")), UNKNOWN_SIZE);
    }
}
