//! Message aggregate.

use super::{ConversationId, MessageDomainError, MessageId, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single utterance in a conversation.
///
/// Messages are immutable after creation; the only exception is the
/// conversation reference, restamped when a conversation adopts the
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
    metadata: Map<String, Value>,
    conversation_id: ConversationId,
}

impl Message {
    /// Creates a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyContent`] when the content is
    /// empty or whitespace-only.
    pub fn new(
        role: Role,
        content: impl Into<String>,
        conversation_id: ConversationId,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Result<Self, MessageDomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(MessageDomainError::EmptyContent);
        }
        Ok(Self {
            id: MessageId::new(),
            role,
            content,
            timestamp: clock.utc(),
            metadata,
            conversation_id,
        })
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the author role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the open metadata map.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns the owning conversation.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub(crate) const fn reassign_conversation(&mut self, conversation_id: ConversationId) {
        self.conversation_id = conversation_id;
    }
}
