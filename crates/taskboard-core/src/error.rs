/*
[INPUT]:  Error sources (filesystem, serialization, invalid board input)
[OUTPUT]: Structured error types for store and board operations
[POS]:    Error handling layer - unified error types for the crate
[UPDATE]: When adding new error sources or operation failure modes
*/

use thiserror::Error;

/// Durable storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem read/write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the task list failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Renaming the temp file over the record failed
    #[error("Temporary file error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Persisted record could not be parsed or violates list invariants
    #[error("Corrupt record under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Storage location is unusable
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

impl StoreError {
    /// Check if the error came from reading malformed persisted data
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Board operations rejected because the input has nothing to act on
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    #[error("no valid email addresses in input")]
    NoValidEmails,

    #[error("no approved tasks to export")]
    NoApprovedTasks,
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
