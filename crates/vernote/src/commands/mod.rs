//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod process;

pub(crate) use build::BuildArgs;
pub(crate) use process::ProcessArgs;
