//! Dependency-manifest handling
//!
//! Discovery of `package.json` files in the monorepo, reversible backups, and
//! the two production-only edits applied before `pnpm deploy`.

pub mod backup;
pub mod discovery;
pub mod package_json;

pub use backup::{backup_manifests, restore_manifests, ManifestBackup};
pub use discovery::find_package_manifests;
pub use package_json::{PackageManifest, PatchFilterReport};

/// File name of a dependency manifest
pub const PACKAGE_JSON: &str = "package.json";
