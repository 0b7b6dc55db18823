//! Handler port invoked by the event bus.

use crate::event::domain::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for handler invocations.
pub type HandlerResult = Result<(), HandlerError>;

/// Failure raised by an event handler.
///
/// Handler failures are logged and isolated by the bus; they never reach the
/// publisher and never affect other handlers.
#[derive(Debug, Clone, Error)]
#[error("event handler failure: {0}")]
pub struct HandlerError(Arc<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    /// Wraps an underlying error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates a failure from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self(Arc::new(std::io::Error::other(message.into())))
    }
}

/// A subscriber receiving domain events from the bus.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Reacts to a single event.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the reaction fails; the bus logs the
    /// failure and continues with the remaining handlers.
    async fn handle(&self, event: &DomainEvent) -> HandlerResult;
}
