//! Run summary formatting
//!
//! The summary goes to stdout after a successful run, in one of three formats.
//!
//! ```ignore
//! use prunekit::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format(&summary)?);
//! ```

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::pipeline::RunSummary;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).context("Failed to serialize summary as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize summary as YAML")
            }
            OutputFormat::Human => Ok(self.format_human(summary)),
        }
    }

    fn format_human(&self, summary: &RunSummary) -> String {
        let mut out = String::new();
        let duration = &summary.build_duration;

        let _ = writeln!(out, "Deploy build complete");
        let _ = writeln!(out, "=====================");
        let _ = writeln!(out, "Root: {}", summary.root);
        let _ = writeln!(out);

        let _ = writeln!(out, "Artifacts:");
        let name_width = summary
            .targets
            .iter()
            .map(|t| t.name.len())
            .max()
            .unwrap_or(0);
        for target in &summary.targets {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>8}  {}",
                target.name,
                target.size,
                target.output,
                width = name_width
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Timing:");
        let _ = writeln!(out, "  Package build:  {}s", duration.package_build);
        let _ = writeln!(out, "  Package deploy: {}s", duration.package_deploy);
        let _ = writeln!(out, "  Total:          {}s", duration.total);
        let _ = writeln!(out);

        if summary.backups_skipped {
            let _ = writeln!(out, "Manifests: backup/restore skipped (CI)");
        } else {
            let _ = writeln!(out, "Manifests: {} restored", summary.manifests_restored);
        }
        if !summary.removed_patches.is_empty() {
            let _ = writeln!(
                out,
                "Patches removed for deploy: {}",
                summary.removed_patches.join(", ")
            );
        }
        let _ = writeln!(
            out,
            "Test controller: {}",
            if summary.test_controller_excluded {
                "excluded"
            } else {
                "included"
            }
        );
        match &summary.license_report {
            Some(report) => {
                let _ = writeln!(out, "License report: {}", report);
            }
            None => {
                let _ = writeln!(out, "License report: not generated");
            }
        }

        if !summary.degraded_phases.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Warnings: non-fatal failures in {}",
                summary.degraded_phases.join(", ")
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BuildDuration;
    use crate::pipeline::TargetSummary;

    fn sample() -> RunSummary {
        RunSummary {
            root: "/srv/monorepo".to_string(),
            targets: vec![
                TargetSummary {
                    name: "application".to_string(),
                    output: "/srv/monorepo/compiled".to_string(),
                    size: "412.7M".to_string(),
                    license_copied: true,
                },
                TargetSummary {
                    name: "task-runner".to_string(),
                    output: "/srv/monorepo/dist/task-runner-javascript".to_string(),
                    size: "Unknown".to_string(),
                    license_copied: false,
                },
            ],
            build_duration: BuildDuration {
                package_build: 231,
                package_deploy: 48,
                total: 291,
            },
            backups_skipped: false,
            manifests_restored: 42,
            removed_patches: vec!["@types/ws@8.18.1".to_string()],
            test_controller_excluded: true,
            license_report: None,
            degraded_phases: vec!["licenses".to_string(), "measure".to_string()],
        }
    }

    #[test]
    fn test_human_format() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&sample())
            .unwrap();
        assert!(output.contains("application    412.7M  /srv/monorepo/compiled"));
        assert!(output.contains("Package build:  231s"));
        assert!(output.contains("Manifests: 42 restored"));
        assert!(output.contains("Test controller: excluded"));
        assert!(output.contains("License report: not generated"));
        assert!(output.contains("Warnings: non-fatal failures in licenses, measure"));
    }

    #[test]
    fn test_human_format_in_ci() {
        let mut summary = sample();
        summary.backups_skipped = true;
        summary.degraded_phases.clear();
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&summary)
            .unwrap();
        assert!(output.contains("backup/restore skipped"));
        assert!(!output.contains("Warnings"));
    }

    #[test]
    fn test_json_format() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format(&sample())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["targets"][0]["size"], "412.7M");
        assert_eq!(value["targets"][0]["licenseCopied"], true);
        assert_eq!(value["buildDuration"]["packageDeploy"], 48);
        assert_eq!(value["manifestsRestored"], 42);
        assert!(value.get("build_duration").is_none());
    }

    #[test]
    fn test_yaml_format() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format(&sample())
            .unwrap();
        assert!(output.contains("manifestsRestored: 42"));
        assert!(output.contains("packageBuild: 231"));
    }
}
