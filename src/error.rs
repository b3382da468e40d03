//! [`Error`] types.

use super::Priority;
use thiserror::Error;

/// Errors returned by [`PriorityQueue`](super::PriorityQueue) operations.
///
/// Neither error modifies the queue, so the caller can recover from both.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The supplied priority is negative.
    #[error("priority must be non-negative: {0}")]
    NegativePriority(Priority),

    /// The queue holds no entries.
    #[error("queue is empty")]
    Empty,
}

/// Result type alias for fallible queue operations.
pub type Result<T> = std::result::Result<T, Error>;
