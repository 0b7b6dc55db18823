//! Conversation aggregate root.

use super::{ConversationId, Message, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered series of messages with shared context.
///
/// Message history is append-only; adding a message restamps its
/// conversation reference so a message can never claim membership of a
/// conversation that does not hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
    context: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[must_use]
    pub fn new(context: Map<String, Value>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            context,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the message history in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the shared context map.
    #[must_use]
    pub const fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends a message, adopting it into this conversation.
    pub fn add_message(&mut self, mut message: Message, clock: &impl Clock) {
        message.reassign_conversation(self.id);
        self.messages.push(message);
        self.updated_at = clock.utc();
    }

    /// Returns the messages authored by the given role, in order.
    #[must_use]
    pub fn messages_by_role(&self, role: Role) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|message| message.role() == role)
            .collect()
    }

    /// Returns the most recent message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
