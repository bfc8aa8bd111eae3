//! Build output records: the per-target build manifest and artifact sizing

pub mod schema;
pub mod size;

pub use schema::{BuildDuration, BuildManifest, BUILD_MANIFEST_FILE};
pub use size::{artifact_size, dir_size, format_size, UNKNOWN_SIZE};
