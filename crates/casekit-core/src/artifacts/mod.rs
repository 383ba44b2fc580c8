//! Retrieval and local staging of per-model artifact files.
//!
//! This module owns the fetch/stage/verify lifecycle for auxiliary code
//! that accompanies a base model in a case directory:
//! - Cloning an artifact repository at a fixed revision into an ephemeral
//!   scratch directory
//! - Moving declared files into a deterministic destination layout
//! - Verifying an existing layout without touching the network

mod descriptor;
mod error;
mod stager;

pub use descriptor::{ArtifactCategory, ArtifactDescriptor};
pub use error::StageError;
pub use stager::ArtifactStager;

#[cfg(test)]
mod tests;
