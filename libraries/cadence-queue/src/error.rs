//! Error types for queue management

use thiserror::Error;

/// Queue errors
///
/// Queue operations themselves never fail (invalid indices are no-ops and
/// empty-queue navigation returns `None`). These errors only come out of the
/// persistence seam.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Backing store failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored state parsed but violates queue invariants
    #[error("Corrupt queue state: {0}")]
    CorruptState(String),

    /// Serialization/deserialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl QueueError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a corrupt state error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptState(msg.into())
    }
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
