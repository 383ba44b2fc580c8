//! Error taxonomy for the fetch/stage lifecycle.

/// Errors raised while staging artifacts.
///
/// `verify` never raises; absence there is the normal negative result of a
/// boolean query.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The clone step could not complete (unreachable source, auth
    /// failure, invalid location). Not retried.
    #[error("Unable to clone artifact repository {location}: {reason}")]
    RepositoryUnavailable { location: String, reason: String },

    /// The checkout step could not switch the clone to the requested
    /// revision. Distinct from a missing declared file.
    #[error("Unable to check out revision {revision}: {reason}")]
    RevisionNotFound { revision: String, reason: String },

    /// A declared repository-relative path does not exist in the
    /// checked-out clone. Files moved before this point stay moved.
    #[error("Declared file {path} does not exist in the checked-out clone")]
    MissingArtifact { path: String },

    /// The owner name cannot be used as a destination path segment.
    #[error("Owner name {0:?} is not usable as a path segment")]
    InvalidOwnerName(String),

    /// Directory creation or file move failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
