//! Shared helpers for integration tests
//!
//! Provides a fixture monorepo copied into a temp directory and a command
//! runner that stands in for pnpm and the license generator.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use prunekit::{CommandOutcome, CommandRunner, CommandSpec};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const LICENSE_REPORT: &str = "THIRD_PARTY_LICENSES.md";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copies `tests/fixtures/pnpm-monorepo` into a fresh temp directory
pub fn fixture_monorepo() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    copy_dir(&fixture_path("pnpm-monorepo"), dir.path()).expect("Failed to copy fixture");
    dir
}

fn copy_dir(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Contents of the fixture's workspace manifests as they are now under `root`
///
/// Only manifests that exist in the fixture are read, so deploy outputs
/// written into the tree do not show up.
pub fn manifest_snapshot(root: &Path) -> Vec<(PathBuf, String)> {
    let fixture = fixture_path("pnpm-monorepo");
    let mut relative = Vec::new();
    collect_manifests(&fixture, &fixture, &mut relative);
    relative.sort();

    relative
        .into_iter()
        .map(|path| {
            let content = read(&root.join(&path));
            (path, content)
        })
        .collect()
}

fn collect_manifests(base: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_manifests(base, &path, out);
        } else if path.file_name().is_some_and(|n| n == "package.json") {
            if let Ok(relative) = path.strip_prefix(base) {
                out.push(relative.to_path_buf());
            }
        }
    }
}

/// Manifest contents seen by a deploy invocation
#[derive(Debug, Clone)]
pub struct DeploySnapshot {
    pub root_manifest: String,
    pub cli_manifest: String,
}

/// Stands in for pnpm and the license generator
///
/// `deploy` invocations create the output directory with a fixed payload;
/// the license command writes the report at the root.
#[derive(Default)]
pub struct FakePnpm {
    calls: Mutex<Vec<CommandSpec>>,
    deploy_snapshots: Mutex<Vec<DeploySnapshot>>,
    failures: Vec<(String, i32)>,
    skip_license_report: bool,
}

impl FakePnpm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendering contains `needle` exit with `code`
    pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
        self.failures.push((needle.to_string(), code));
        self
    }

    /// The license command succeeds without writing a report
    pub fn without_license_report(mut self) -> Self {
        self.skip_license_report = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|spec| spec.to_string())
            .collect()
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deploy_snapshots(&self) -> Vec<DeploySnapshot> {
        self.deploy_snapshots.lock().unwrap().clone()
    }

    fn simulate(&self, spec: &CommandSpec) -> std::io::Result<()> {
        if spec.args.iter().any(|a| a == "deploy") {
            self.deploy_snapshots.lock().unwrap().push(DeploySnapshot {
                root_manifest: read(&spec.cwd.join("package.json")),
                cli_manifest: read(&spec.cwd.join("packages/cli/package.json")),
            });

            if let Some(output) = spec.args.last() {
                let output = spec.cwd.join(output);
                fs::create_dir_all(output.join("node_modules/dep"))?;
                fs::write(output.join("package.json"), "{}\n")?;
                fs::write(output.join("node_modules/dep/index.js"), vec![b'x'; 2048])?;
            }
        } else if spec.args.iter().any(|a| a.contains("licenses")) && !self.skip_license_report {
            fs::write(spec.cwd.join(LICENSE_REPORT), "# Third-party licenses\n")?;
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRunner for FakePnpm {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.calls.lock().unwrap().push(spec.clone());

        let rendered = spec.to_string();
        if let Some((_, code)) = self
            .failures
            .iter()
            .find(|(needle, _)| rendered.contains(needle.as_str()))
        {
            return Ok(CommandOutcome::failure(*code));
        }

        self.simulate(spec)?;
        Ok(CommandOutcome::success())
    }
}
