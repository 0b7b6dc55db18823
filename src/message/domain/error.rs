//! Errors raised by message domain validation.

use thiserror::Error;

/// Raised when a string does not name a known message role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message role: {0}")]
pub struct ParseRoleError(pub String);

/// Domain-rule violations on the message aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageDomainError {
    /// Message content must not be empty or whitespace-only.
    #[error("message content must not be empty")]
    EmptyContent,
}
