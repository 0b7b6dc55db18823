//! Shared test doubles for integration tests.

#![expect(
    dead_code,
    reason = "Each integration test binary uses a subset of these helpers"
)]

use async_trait::async_trait;
use brunel::event::domain::{DomainEvent, EventKind};
use brunel::event::ports::{EventHandler, EventSink, HandlerResult, SinkError, SinkResult};
use brunel::message::ports::{Completion, ContextEntry, GenerationClient, GenerationError,
    GenerationResult};
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// An [`EventHandler`] that records every event it receives.
pub struct RecordingHandler {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingHandler {
    /// Creates an empty recorder.
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded event kinds in arrival order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(DomainEvent::kind).collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, event: &DomainEvent) -> HandlerResult {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// An [`EventSink`] that records every published topic and payload.
pub struct RecordingSink {
    published: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub const fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the published records.
    pub fn published(&self) -> Vec<(String, Value)> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, topic: &str, payload: Value) -> SinkResult<()> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((topic.to_owned(), payload));
        Ok(())
    }
}

/// An [`EventSink`] that rejects every publish.
pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn publish(&self, _topic: &str, _payload: Value) -> SinkResult<()> {
        Err(SinkError::publish(std::io::Error::other("broker unreachable")))
    }
}

/// A [`GenerationClient`] that answers every prompt with a canned reply.
pub struct StubGenerationClient {
    reply: String,
}

impl StubGenerationClient {
    /// Creates a client with the given canned reply.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl GenerationClient for StubGenerationClient {
    async fn generate(
        &self,
        _prompt: &str,
        _context: &[ContextEntry],
    ) -> GenerationResult<Completion> {
        Ok(Completion::new(self.reply.clone())
            .with_model("stub-model")
            .with_tokens_used(7))
    }

    async fn health_check(&self) -> GenerationResult<bool> {
        Ok(true)
    }
}

/// A [`GenerationClient`] whose every call fails.
pub struct FailingGenerationClient;

#[async_trait]
impl GenerationClient for FailingGenerationClient {
    async fn generate(
        &self,
        _prompt: &str,
        _context: &[ContextEntry],
    ) -> GenerationResult<Completion> {
        Err(GenerationError::message("provider unavailable"))
    }

    async fn health_check(&self) -> GenerationResult<bool> {
        Err(GenerationError::message("provider unavailable"))
    }
}
