//! Error taxonomy for the contact directory.
//!
//! Storage backends report faults as [`StoreError`]; the directory service
//! wraps those together with its own outcomes in [`DirectoryError`]. The
//! HTTP boundary matches on these exhaustively.

/// A create or update payload broke one of the contact rules.
///
/// The `Display` text is the message returned to clients.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name missing")]
    NameMissing,

    #[error("number missing")]
    NumberMissing,

    #[error("name must be unique")]
    NameTaken,
}

/// Faults raised by a storage backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The id is not in the backend's key format.
    #[error("malformatted id")]
    MalformedId(String),

    /// The backend refused the data (constraint violation).
    #[error("validation failed: {0}")]
    Rejected(String),

    /// Anything else: I/O, poisoned locks, SQL errors.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed directory operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("contact {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
