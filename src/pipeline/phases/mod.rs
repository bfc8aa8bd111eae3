// Deploy pipeline phases, in execution order.
//
// Each phase reads what earlier phases left in the `DeployContext` and adds
// its own results. Only the orchestrator decides the order.

pub mod command_helper;

#[path = "01_clean.rs"]
pub mod clean;
#[path = "02_build.rs"]
pub mod build;
#[path = "03_licenses.rs"]
pub mod licenses;
#[path = "04_backup.rs"]
pub mod backup;
#[path = "05_patches.rs"]
pub mod patches;
#[path = "06_test_controller.rs"]
pub mod test_controller;
#[path = "07_deploy.rs"]
pub mod deploy;
#[path = "08_restore.rs"]
pub mod restore;
#[path = "09_measure.rs"]
pub mod measure;
#[path = "10_manifest.rs"]
pub mod manifest;

#[cfg(test)]
pub(crate) mod test_support;

pub use backup::BackupPhase;
pub use build::BuildPhase;
pub use clean::CleanPhase;
pub use deploy::DeployTargetsPhase;
pub use licenses::LicensesPhase;
pub use manifest::ManifestPhase;
pub use measure::MeasurePhase;
pub use patches::PatchesPhase;
pub use restore::RestorePhase;
pub use test_controller::TestControllerPhase;
