//! Casekit Core Library
//!
//! Provides the domain logic for assembling reproducible model case
//! directories, starting with retrieval and staging of per-model
//! artifact files from version-controlled sources.

pub mod artifacts;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::artifacts::{ArtifactCategory, ArtifactDescriptor, ArtifactStager, StageError};
}
