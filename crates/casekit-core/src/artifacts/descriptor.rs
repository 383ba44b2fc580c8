//! Artifact source specification types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StageError;

/// The two fixed kinds of staged artifacts.
///
/// Each variant carries a fixed path label used as the first segment of the
/// destination layout. The labels are a durable contract consumed by
/// downstream build/run tooling and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactCategory {
    /// Files needed to compile a unique instance of the base model
    SourceMods,
    /// Files needed at runtime by the base model
    Namelists,
}

impl ArtifactCategory {
    /// The fixed destination-path label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactCategory::SourceMods => "source_mods",
            ArtifactCategory::Namelists => "namelists",
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Specification of an artifact set tied to a base model.
///
/// Declared file paths are relative to the top level of `source_location`.
/// A category set to `None` means "not applicable", which is distinct from
/// an empty list of declared files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Name of the owning base model; used verbatim as a path segment
    pub owner_name: String,
    /// Address of the version-controlled artifact repository
    pub source_location: String,
    /// Checkout target (tag, branch, or commit hash); opaque to this crate
    pub revision: String,
    /// Build-time declared files
    pub source_mods: Option<Vec<String>>,
    /// Run-time declared files
    pub namelists: Option<Vec<String>>,
}

impl ArtifactDescriptor {
    /// Create a descriptor with no declared files.
    ///
    /// Fails if `owner_name` is empty or not usable as a single path
    /// segment.
    pub fn new(
        owner_name: impl Into<String>,
        source_location: impl Into<String>,
        revision: impl Into<String>,
    ) -> Result<Self, StageError> {
        let owner_name = owner_name.into();
        if !is_path_segment(&owner_name) {
            return Err(StageError::InvalidOwnerName(owner_name));
        }
        Ok(Self {
            owner_name,
            source_location: source_location.into(),
            revision: revision.into(),
            source_mods: None,
            namelists: None,
        })
    }

    /// Declare the build-time files.
    pub fn with_source_mods<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_mods = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the run-time files.
    pub fn with_namelists<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namelists = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Iterate over the present categories and their declared files, in
    /// fixed order (source mods first).
    pub fn categories(&self) -> impl Iterator<Item = (ArtifactCategory, &[String])> {
        [
            (ArtifactCategory::SourceMods, self.source_mods.as_deref()),
            (ArtifactCategory::Namelists, self.namelists.as_deref()),
        ]
        .into_iter()
        .filter_map(|(category, files)| files.map(|f| (category, f)))
    }
}

impl fmt::Display for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Artifact set for base model: {}", self.owner_name)?;
        write!(
            f,
            "Repository: {} (checkout target: {})",
            self.source_location, self.revision
        )?;
        for (category, files) in self.categories() {
            write!(f, "\n{} (paths relative to repository top level):", category)?;
            for file in files {
                write!(f, "\n    {}", file)?;
            }
        }
        Ok(())
    }
}

/// A usable path segment: non-empty, no separators, not a dot entry.
fn is_path_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
