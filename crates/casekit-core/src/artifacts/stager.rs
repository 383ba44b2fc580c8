//! Fetching and staging of declared artifact files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::descriptor::ArtifactDescriptor;
use super::error::StageError;

/// Local staging status tracked across fetch/verify calls.
#[derive(Debug, Clone, Default)]
struct StagingState {
    /// `None` until the first fetch or verify
    staged: Option<bool>,
    /// Destination root of the last successful fetch or positive verify
    staged_root: Option<PathBuf>,
}

/// Fetches an artifact repository at a fixed revision and stages declared
/// files into a deterministic destination layout.
///
/// The layout is `<destination_root>/<category-label>/<owner_name>/` with
/// each declared file placed under its base filename. Directory components
/// of declared paths are discarded, so declared files sharing a basename
/// overwrite one another at the destination.
#[derive(Debug)]
pub struct ArtifactStager {
    descriptor: ArtifactDescriptor,
    scratch_root: Option<PathBuf>,
    state: StagingState,
}

impl ArtifactStager {
    /// Create a stager for the given descriptor.
    pub fn new(descriptor: ArtifactDescriptor) -> Self {
        Self {
            descriptor,
            scratch_root: None,
            state: StagingState::default(),
        }
    }

    /// Direct ephemeral clones into `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// The descriptor this stager operates on.
    pub fn descriptor(&self) -> &ArtifactDescriptor {
        &self.descriptor
    }

    /// Tri-state staging status: `None` until a fetch or verify has run.
    pub fn is_staged(&self) -> Option<bool> {
        self.state.staged
    }

    /// Destination root of the last successful fetch or positive verify.
    pub fn staged_root(&self) -> Option<&Path> {
        self.state.staged_root.as_deref()
    }

    /// Fetch the artifact repository and stage every declared file under
    /// `destination_root`.
    ///
    /// Clones `source_location` into an ephemeral scratch directory, checks
    /// out `revision`, and moves each declared file into
    /// `<destination_root>/<category-label>/<owner_name>/<basename>`. The
    /// scratch clone is removed on every exit path. A failure partway
    /// through leaves files already moved in place; a later `verify` will
    /// report the layout as incomplete.
    pub fn fetch(&mut self, destination_root: &Path) -> Result<(), StageError> {
        let scratch = self.create_scratch()?;
        let clone_dir = scratch.path();

        tracing::info!(
            source = %self.descriptor.source_location,
            clone_dir = %clone_dir.display(),
            "cloning artifact repository"
        );
        run_git(
            None,
            &[
                OsStr::new("clone"),
                self.descriptor.source_location.as_ref(),
                clone_dir.as_os_str(),
            ],
        )
        .map_err(|reason| StageError::RepositoryUnavailable {
            location: self.descriptor.source_location.clone(),
            reason,
        })?;

        tracing::debug!(revision = %self.descriptor.revision, "checking out revision");
        run_git(
            Some(clone_dir),
            &[OsStr::new("checkout"), self.descriptor.revision.as_ref()],
        )
        .map_err(|reason| StageError::RevisionNotFound {
            revision: self.descriptor.revision.clone(),
            reason,
        })?;

        for (category, files) in self.descriptor.categories() {
            let target_dir = destination_root
                .join(category.label())
                .join(&self.descriptor.owner_name);
            std::fs::create_dir_all(&target_dir)?;

            for declared in files {
                let src = clone_dir.join(declared);
                let basename = Path::new(declared)
                    .file_name()
                    .filter(|_| src.exists())
                    .ok_or_else(|| StageError::MissingArtifact {
                        path: declared.clone(),
                    })?;
                let dst = target_dir.join(basename);
                tracing::info!(
                    src = %src.display(),
                    dst = %dst.display(),
                    "moving staged file"
                );
                move_file(&src, &dst)?;
            }
        }

        self.state.staged = Some(true);
        self.state.staged_root = Some(destination_root.to_path_buf());
        Ok(())
    }

    /// Check whether every declared file is already present under
    /// `destination_root`.
    ///
    /// A pure filesystem existence check over the same layout `fetch`
    /// produces; returns `false` on the first missing file. It cannot
    /// detect staged files that are stale or from the wrong revision.
    pub fn verify(&mut self, destination_root: &Path) -> bool {
        for (category, files) in self.descriptor.categories() {
            let target_dir = destination_root
                .join(category.label())
                .join(&self.descriptor.owner_name);

            for declared in files {
                let present = Path::new(declared)
                    .file_name()
                    .is_some_and(|basename| target_dir.join(basename).exists());
                if !present {
                    self.state.staged = Some(false);
                    return false;
                }
            }
        }

        if self.state.staged != Some(true) {
            self.state.staged = Some(true);
            self.state.staged_root = Some(destination_root.to_path_buf());
        }
        true
    }

    /// Allocate the scoped scratch directory for one fetch.
    fn create_scratch(&self) -> Result<TempDir, StageError> {
        let scratch = match &self.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                TempDir::with_prefix_in("artifact-clone-", root)?
            }
            None => TempDir::with_prefix("artifact-clone-")?,
        };
        Ok(scratch)
    }
}

/// Run a git command, returning trimmed stderr on failure.
fn run_git(cwd: Option<&Path>, args: &[&OsStr]) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let output = cmd
        .output()
        .map_err(|err| format!("failed to invoke git: {err}"))?;
    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
    }
    Ok(())
}

/// Move a file out of the scratch clone.
///
/// The clone and the destination may sit on different filesystems, where
/// rename fails; fall back to copy + delete.
fn move_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    std::fs::copy(src, dst)?;
    std::fs::remove_file(src)
}
