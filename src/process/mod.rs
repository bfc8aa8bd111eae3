//! External process execution
//!
//! Every package-manager invocation goes through [`CommandRunner`] so the
//! pipeline can be driven by a scripted runner in tests.

mod runner;

pub use runner::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
