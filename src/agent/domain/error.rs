//! Errors raised by agent domain validation.

use thiserror::Error;

/// Raised when a string does not name a known agent kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown agent kind: {0}")]
pub struct ParseAgentKindError(pub String);

/// Raised when a string does not name a known agent status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown agent status: {0}")]
pub struct ParseAgentStatusError(pub String);
