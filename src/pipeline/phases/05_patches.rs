use crate::manifest::PackageManifest;
use crate::pipeline::context::DeployContext;
use crate::pipeline::phase_trait::{DeployPhase, PhaseOutcome};
use crate::pipeline::DeployError;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Strips development-only patches from the root manifest
///
/// Only patches whose name starts with an allow-listed prefix are needed at
/// runtime; pnpm would otherwise fail to apply the rest against the pruned
/// production dependency set.
pub struct PatchesPhase;

#[async_trait]
impl DeployPhase for PatchesPhase {
    fn name(&self) -> &'static str {
        "patches"
    }

    async fn execute(&self, context: &mut DeployContext) -> Result<PhaseOutcome> {
        let path = context.root_manifest();
        if !path.is_file() {
            return Err(DeployError::MissingManifest(path).into());
        }

        context.ensure_backed_up(&path)?;

        let mut manifest = PackageManifest::load(&path)?;
        let report = manifest.retain_patches(&context.config.patch_allow_list)?;

        if report.changed() {
            manifest.save()?;
            info!(
                kept = report.kept.len(),
                removed = report.removed.len(),
                "Filtered patched dependencies"
            );
            debug!(removed = ?report.removed, "Removed patches");
        } else {
            debug!("No patches to remove");
        }

        context.removed_patches = report.removed;
        Ok(PhaseOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployConfig;
    use crate::pipeline::phases::test_support::{
        backed_up_context, context_for, monorepo, ScriptedRunner,
    };
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_rewrites_root_manifest() {
        let dir = monorepo();
        let mut context = backed_up_context(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default()).await;

        PatchesPhase.execute(&mut context).await.unwrap();

        let manifest = PackageManifest::load(&dir.path().join("package.json")).unwrap();
        assert_eq!(manifest.patched_dependencies(), vec!["bull@4.16.4"]);
        assert_eq!(context.removed_patches, vec!["@types/ws@8.18.1"]);
    }

    #[tokio::test]
    async fn test_untouched_when_nothing_to_remove() {
        let dir = TempDir::new().unwrap();
        let content = "{\"name\":\"root\",\"pnpm\":{\"patchedDependencies\":{\"bull@1.0.0\":\"p\"}}}";
        fs::write(dir.path().join("package.json"), content).unwrap();
        let mut context = backed_up_context(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default()).await;

        PatchesPhase.execute(&mut context).await.unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("package.json")).unwrap(), content);
    }

    #[tokio::test]
    async fn test_missing_root_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut context = context_for(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default());

        let err = PatchesPhase.execute(&mut context).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::MissingManifest(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_root_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{ nope").unwrap();
        let mut context = backed_up_context(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default()).await;

        let err = PatchesPhase.execute(&mut context).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::InvalidManifest { .. })
        ));
    }

    #[tokio::test]
    async fn test_refuses_manifest_without_backup() {
        let dir = monorepo();
        let original = fs::read_to_string(dir.path().join("package.json")).unwrap();
        let mut context = context_for(&dir, Arc::new(ScriptedRunner::new()), DeployConfig::default());

        let err = PatchesPhase.execute(&mut context).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::NotBackedUp(_))
        ));
        assert_eq!(fs::read_to_string(dir.path().join("package.json")).unwrap(), original);
    }

    #[tokio::test]
    async fn test_ci_mutates_without_backup() {
        let dir = monorepo();
        let mut context = context_for(
            &dir,
            Arc::new(ScriptedRunner::new()),
            DeployConfig::default().with_ci(true),
        );

        PatchesPhase.execute(&mut context).await.unwrap();
        assert_eq!(context.removed_patches, vec!["@types/ws@8.18.1"]);
    }
}
