//! Provider-agnostic reply generation with event emission.

use crate::event::bus::EventBus;
use crate::event::domain::DomainEvent;
use crate::message::ports::{Completion, ContextEntry, GenerationClient, GenerationResult};
use mockable::Clock;
use std::sync::Arc;
use uuid::Uuid;

/// Wraps a [`GenerationClient`] with request lifecycle events.
///
/// Every call mints a request id and publishes `GenerationRequested`,
/// followed by `GenerationCompleted` on success or `GenerationFailed`
/// before the error propagates.
pub struct GenerationService<C>
where
    C: Clock + Send + Sync,
{
    client: Arc<dyn GenerationClient>,
    bus: Arc<EventBus>,
    clock: Arc<C>,
}

impl<C> GenerationService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new generation service.
    #[must_use]
    pub const fn new(client: Arc<dyn GenerationClient>, bus: Arc<EventBus>, clock: Arc<C>) -> Self {
        Self { client, bus, clock }
    }

    /// Generates a reply, emitting the request lifecycle events.
    ///
    /// # Errors
    ///
    /// Returns the provider error after `GenerationFailed` has been
    /// published.
    pub async fn generate(
        &self,
        prompt: &str,
        context: &[ContextEntry],
    ) -> GenerationResult<Completion> {
        let request_id = Uuid::new_v4();
        let requested =
            DomainEvent::generation_requested(request_id, prompt, None, self.clock.as_ref());
        self.bus.publish(&requested).await;

        match self.client.generate(prompt, context).await {
            Ok(completion) => {
                let completed = DomainEvent::generation_completed(
                    request_id,
                    completion.content(),
                    completion.tokens_used(),
                    completion.model(),
                    self.clock.as_ref(),
                );
                self.bus.publish(&completed).await;
                Ok(completion)
            }
            Err(err) => {
                tracing::error!(request = %request_id, %err, "generation failed");
                let failed = DomainEvent::generation_failed(
                    request_id,
                    &err.to_string(),
                    self.clock.as_ref(),
                );
                self.bus.publish(&failed).await;
                Err(err)
            }
        }
    }

    /// Probes provider availability, mapping probe failures to `false`.
    pub async fn health_check(&self) -> bool {
        match self.client.health_check().await {
            Ok(healthy) => healthy,
            Err(err) => {
                tracing::warn!(%err, "generation health check failed");
                false
            }
        }
    }
}
