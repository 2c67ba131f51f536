//! Error types for queue operations

use std::collections::TryReserveError;

use thiserror::Error;

use crate::list::AllocError;

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

/// Queue errors
///
/// Every failing operation leaves the queue exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue handle is absent")]
    Absent,

    #[error("queue is empty")]
    Empty,

    #[error("memory allocation failed")]
    AllocFailure,

    #[error("output buffer is absent or has no room for the terminator")]
    InvalidOutputTarget,
}

impl From<AllocError> for QueueError {
    fn from(_: AllocError) -> Self {
        QueueError::AllocFailure
    }
}

impl From<TryReserveError> for QueueError {
    fn from(_: TryReserveError) -> Self {
        QueueError::AllocFailure
    }
}
