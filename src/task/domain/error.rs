//! Errors raised by task domain validation.

use super::TaskStatus;
use thiserror::Error;

/// Raised when a string does not name a known task kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task kind: {0}")]
pub struct ParseTaskKindError(pub String);

/// Raised when a string does not name a known task status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Domain-rule violations on the task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskDomainError {
    /// The task payload must carry at least one entry.
    #[error("task payload must not be empty")]
    EmptyPayload,

    /// The requested state transition is not permitted.
    #[error("invalid task transition: {from} -> {to}")]
    InvalidTransition {
        /// The status the task is in.
        from: TaskStatus,
        /// The status the transition requested.
        to: TaskStatus,
    },
}
