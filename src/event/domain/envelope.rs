//! The immutable event record published on the bus.

use super::{EventId, EventKind};
use crate::agent::domain::{AgentId, AgentKind, AgentStatus, CapabilitySet};
use crate::message::domain::{ConversationId, MessageId, Role};
use crate::task::domain::{TaskId, TaskKind};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An immutable notification record describing something that happened to an
/// entity.
///
/// Events serialise to a flat five-field record: `event_id`, `event_type`,
/// `occurred_at`, `aggregate_id`, and `metadata`. Event-specific fields live
/// inside `metadata` so subscribers and external sinks can consume every
/// kind through one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    event_id: EventId,
    #[serde(rename = "event_type")]
    kind: EventKind,
    occurred_at: DateTime<Utc>,
    aggregate_id: String,
    metadata: Map<String, Value>,
}

impl DomainEvent {
    fn new(
        kind: EventKind,
        aggregate_id: String,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            kind,
            occurred_at: clock.utc(),
            aggregate_id,
            metadata,
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the event-type tag.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns when the event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the identifier of the entity the event is about.
    #[must_use]
    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    /// Returns the event-specific fields.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Builds an [`EventKind::AgentCreated`] event.
    #[must_use]
    pub fn agent_created(
        agent_id: AgentId,
        name: &str,
        kind: AgentKind,
        capabilities: &CapabilitySet,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("agent_name".to_owned(), Value::String(name.to_owned()));
        metadata.insert(
            "agent_type".to_owned(),
            Value::String(kind.as_str().to_owned()),
        );
        metadata.insert("capabilities".to_owned(), capabilities.as_json());
        Self::new(EventKind::AgentCreated, agent_id.to_string(), metadata, clock)
    }

    /// Builds an [`EventKind::AgentStatusChanged`] event.
    #[must_use]
    pub fn agent_status_changed(
        agent_id: AgentId,
        old_status: AgentStatus,
        new_status: AgentStatus,
        reason: Option<&str>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "old_status".to_owned(),
            Value::String(old_status.as_str().to_owned()),
        );
        metadata.insert(
            "new_status".to_owned(),
            Value::String(new_status.as_str().to_owned()),
        );
        metadata.insert("reason".to_owned(), optional_string(reason));
        Self::new(
            EventKind::AgentStatusChanged,
            agent_id.to_string(),
            metadata,
            clock,
        )
    }

    /// Builds an [`EventKind::TaskCreated`] event.
    #[must_use]
    pub fn task_created(
        task_id: TaskId,
        kind: TaskKind,
        payload: &Map<String, Value>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "task_type".to_owned(),
            Value::String(kind.as_str().to_owned()),
        );
        metadata.insert("payload".to_owned(), Value::Object(payload.clone()));
        Self::new(EventKind::TaskCreated, task_id.to_string(), metadata, clock)
    }

    /// Builds an [`EventKind::TaskAssigned`] event.
    #[must_use]
    pub fn task_assigned(task_id: TaskId, agent_id: AgentId, clock: &impl Clock) -> Self {
        let mut metadata = Map::new();
        metadata.insert("agent_id".to_owned(), Value::String(agent_id.to_string()));
        Self::new(EventKind::TaskAssigned, task_id.to_string(), metadata, clock)
    }

    /// Builds an [`EventKind::TaskCompleted`] event.
    #[must_use]
    pub fn task_completed(
        task_id: TaskId,
        result: &Map<String, Value>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("result".to_owned(), Value::Object(result.clone()));
        Self::new(EventKind::TaskCompleted, task_id.to_string(), metadata, clock)
    }

    /// Builds an [`EventKind::TaskFailed`] event.
    #[must_use]
    pub fn task_failed(
        task_id: TaskId,
        error_message: &str,
        error_kind: Option<&str>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "error_message".to_owned(),
            Value::String(error_message.to_owned()),
        );
        metadata.insert("error_type".to_owned(), optional_string(error_kind));
        Self::new(EventKind::TaskFailed, task_id.to_string(), metadata, clock)
    }

    /// Builds an [`EventKind::MessageReceived`] event.
    #[must_use]
    pub fn message_received(
        message_id: MessageId,
        role: Role,
        content: &str,
        conversation_id: ConversationId,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("role".to_owned(), Value::String(role.as_str().to_owned()));
        metadata.insert("content".to_owned(), Value::String(content.to_owned()));
        metadata.insert(
            "conversation_id".to_owned(),
            Value::String(conversation_id.to_string()),
        );
        Self::new(
            EventKind::MessageReceived,
            message_id.to_string(),
            metadata,
            clock,
        )
    }

    /// Builds an [`EventKind::MessageProcessed`] event.
    ///
    /// The aggregate is the inbound message that triggered processing;
    /// `response` carries the generated reply content.
    #[must_use]
    pub fn message_processed(message_id: MessageId, response: &str, clock: &impl Clock) -> Self {
        let mut metadata = Map::new();
        metadata.insert("response".to_owned(), Value::String(response.to_owned()));
        Self::new(
            EventKind::MessageProcessed,
            message_id.to_string(),
            metadata,
            clock,
        )
    }

    /// Builds an [`EventKind::GenerationRequested`] event.
    #[must_use]
    pub fn generation_requested(
        request_id: Uuid,
        prompt: &str,
        model: Option<&str>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("prompt".to_owned(), Value::String(prompt.to_owned()));
        metadata.insert("model".to_owned(), optional_string(model));
        Self::new(
            EventKind::GenerationRequested,
            request_id.to_string(),
            metadata,
            clock,
        )
    }

    /// Builds an [`EventKind::GenerationCompleted`] event.
    #[must_use]
    pub fn generation_completed(
        request_id: Uuid,
        content: &str,
        tokens_used: Option<u64>,
        model: Option<&str>,
        clock: &impl Clock,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "response_content".to_owned(),
            Value::String(content.to_owned()),
        );
        metadata.insert(
            "tokens_used".to_owned(),
            tokens_used.map_or(Value::Null, Value::from),
        );
        metadata.insert("model".to_owned(), optional_string(model));
        Self::new(
            EventKind::GenerationCompleted,
            request_id.to_string(),
            metadata,
            clock,
        )
    }

    /// Builds an [`EventKind::GenerationFailed`] event.
    #[must_use]
    pub fn generation_failed(request_id: Uuid, error_message: &str, clock: &impl Clock) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "error_message".to_owned(),
            Value::String(error_message.to_owned()),
        );
        Self::new(
            EventKind::GenerationFailed,
            request_id.to_string(),
            metadata,
            clock,
        )
    }
}

/// Maps an optional string to a JSON string or null.
fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_owned()))
}
