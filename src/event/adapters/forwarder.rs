//! Forwards bus events to an external [`EventSink`].

use crate::event::domain::DomainEvent;
use crate::event::ports::{EventHandler, EventSink, HandlerResult};
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_TOPIC_PREFIX: &str = "brunel.events";

/// An [`EventHandler`] that serialises each event and publishes it to an
/// external sink.
///
/// The topic is derived from the event kind: `<prefix>.<kind>` with the kind
/// tag lowercased, so `TaskAssigned` under the default prefix becomes
/// `brunel.events.taskassigned`. Sink failures are logged and swallowed; an
/// unreachable broker must not disturb in-process dispatch.
pub struct SinkForwarder {
    sink: Arc<dyn EventSink>,
    topic_prefix: String,
}

impl SinkForwarder {
    /// Creates a forwarder with the default topic prefix.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_prefix(sink, DEFAULT_TOPIC_PREFIX)
    }

    /// Creates a forwarder with a custom topic prefix.
    #[must_use]
    pub fn with_prefix(sink: Arc<dyn EventSink>, topic_prefix: impl Into<String>) -> Self {
        Self {
            sink,
            topic_prefix: topic_prefix.into(),
        }
    }

    fn topic_for(&self, event: &DomainEvent) -> String {
        format!(
            "{}.{}",
            self.topic_prefix,
            event.kind().as_str().to_lowercase()
        )
    }
}

#[async_trait]
impl EventHandler for SinkForwarder {
    async fn handle(&self, event: &DomainEvent) -> HandlerResult {
        let topic = self.topic_for(event);
        let payload = match serde_json::to_value(event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(kind = %event.kind(), %err, "failed to serialise event");
                return Ok(());
            }
        };
        if let Err(err) = self.sink.publish(&topic, payload).await {
            tracing::error!(kind = %event.kind(), %topic, %err, "failed to forward event to sink");
        }
        Ok(())
    }
}
