//! Error types for the event domain.

use thiserror::Error;

/// Error returned while parsing event kinds from their wire tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event kind: {0}")]
pub struct ParseEventKindError(pub String);
