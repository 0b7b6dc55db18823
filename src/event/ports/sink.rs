//! External sink port for forwarding events beyond the process boundary.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors returned by event sink implementations.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// The sink rejected or failed to deliver the payload.
    #[error("event sink publish failure: {0}")]
    Publish(Arc<dyn std::error::Error + Send + Sync>),
}

impl SinkError {
    /// Wraps a delivery error.
    pub fn publish(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Publish(Arc::new(err))
    }
}

/// Outbound channel for serialised domain events.
///
/// Implementations typically publish to a message broker topic. Delivery
/// guarantees, authentication, and retry policy belong to the
/// implementation, not to this contract.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes a JSON payload to the named topic.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when delivery fails.
    async fn publish(&self, topic: &str, payload: Value) -> SinkResult<()>;
}
