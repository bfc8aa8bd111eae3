use crate::config::DeployConfig;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::DeployPhase;
use crate::pipeline::phases::BackupPhase;
use crate::process::{CommandOutcome, CommandRunner, CommandSpec};
use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ROOT_MANIFEST: &str = r#"{
  "name": "monorepo",
  "private": true,
  "pnpm": {
    "patchedDependencies": {
      "bull@4.16.4": "patches/bull@4.16.4.patch",
      "@types/ws@8.18.1": "patches/@types__ws@8.18.1.patch"
    }
  }
}
"#;

pub const CLI_MANIFEST: &str = r#"{
  "name": "n8n",
  "files": [
    "bin",
    "dist"
  ]
}
"#;

/// Records every command and answers from a script instead of spawning
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failing: Vec<(String, i32)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendered form contains `needle` exit with `code`
    pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
        self.failing.push((needle.to_string(), code));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.calls.lock().unwrap().push(spec.clone());
        let rendered = spec.to_string();
        for (needle, code) in &self.failing {
            if rendered.contains(needle.as_str()) {
                return Ok(CommandOutcome::failure(*code));
            }
        }
        Ok(CommandOutcome::success())
    }
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Scratch monorepo with a root manifest and the cli package
pub fn monorepo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "package.json", ROOT_MANIFEST);
    write_file(dir.path(), "packages/cli/package.json", CLI_MANIFEST);
    dir
}

pub fn context_for(dir: &TempDir, runner: Arc<ScriptedRunner>, flags: DeployConfig) -> DeployContext {
    DeployContext::new(
        dir.path().to_path_buf(),
        PipelineConfig::default(),
        flags,
        runner,
    )
}

/// Context whose workspace manifests have already been backed up
pub async fn backed_up_context(
    dir: &TempDir,
    runner: Arc<ScriptedRunner>,
    flags: DeployConfig,
) -> DeployContext {
    let mut context = context_for(dir, runner, flags);
    BackupPhase.execute(&mut context).await.unwrap();
    context
}
