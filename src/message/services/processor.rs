//! Inbound message processing.
//!
//! Provides [`MessageProcessor`] which records inbound messages into
//! conversations and, for user messages, drives a generated reply through
//! the configured generation service.

use crate::event::bus::EventBus;
use crate::event::domain::DomainEvent;
use crate::message::domain::{
    Conversation, ConversationId, Message, MessageDomainError, ParseRoleError, Role,
};
use crate::message::ports::{ContextEntry, GenerationError, MessageRepository,
    MessageRepositoryError};
use crate::message::services::GenerationService;
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on the conversation history handed to generation.
const HISTORY_LIMIT: usize = 100;

/// Request payload for processing an inbound message.
///
/// The role arrives as a string and is validated against [`Role`] during
/// processing. Without a conversation id (or with an unknown one) a fresh
/// conversation is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMessageRequest {
    content: String,
    role: String,
    conversation_id: Option<ConversationId>,
    metadata: Map<String, Value>,
}

impl ProcessMessageRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(content: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: role.into(),
            conversation_id: None,
            metadata: Map::new(),
        }
    }

    /// Targets an existing conversation.
    #[must_use]
    pub const fn with_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    /// Sets the open metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Service-level errors for message processing.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The requested role is not recognised.
    #[error(transparent)]
    UnknownRole(#[from] ParseRoleError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessageDomainError),

    /// Message persistence failed.
    #[error(transparent)]
    Repository(#[from] MessageRepositoryError),

    /// Reply generation failed after the inbound message was recorded.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type for message processing operations.
pub type ProcessorResult<T> = Result<T, ProcessorError>;

/// Records inbound messages and drives generated replies.
pub struct MessageProcessor<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    messages: Arc<R>,
    bus: Arc<EventBus>,
    generation: Option<Arc<GenerationService<C>>>,
    clock: Arc<C>,
}

impl<R, C> MessageProcessor<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a processor without reply generation; user messages are
    /// recorded but never answered.
    #[must_use]
    pub const fn new(messages: Arc<R>, bus: Arc<EventBus>, clock: Arc<C>) -> Self {
        Self {
            messages,
            bus,
            generation: None,
            clock,
        }
    }

    /// Attaches a generation service, enabling replies to user messages.
    #[must_use]
    pub fn with_generation(mut self, generation: Arc<GenerationService<C>>) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Records an inbound message, replying when it is a user message and
    /// generation is configured.
    ///
    /// The inbound message is durably recorded before any reply is
    /// attempted, so a generation failure never rolls it back; the error
    /// propagates after the fact.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Domain`] for empty content,
    /// [`ProcessorError::UnknownRole`] for an unrecognised role, a
    /// repository error when persistence fails, or
    /// [`ProcessorError::Generation`] when the reply fails.
    pub async fn process_message(&self, request: ProcessMessageRequest) -> ProcessorResult<Message> {
        let ProcessMessageRequest {
            content,
            role,
            conversation_id,
            metadata,
        } = request;
        let role = Role::try_from(role.as_str())?;
        // Checked before conversation resolution so a rejected message
        // never leaves behind an empty conversation.
        if content.trim().is_empty() {
            return Err(MessageDomainError::EmptyContent.into());
        }

        let conversation = self.resolve_conversation(conversation_id, &metadata).await?;

        let message = Message::new(
            role,
            content,
            conversation.id(),
            metadata,
            self.clock.as_ref(),
        )?;
        self.messages.create_message(&message).await?;
        self.messages
            .append_to_conversation(conversation.id(), &message)
            .await?;

        let received = DomainEvent::message_received(
            message.id(),
            message.role(),
            message.content(),
            conversation.id(),
            self.clock.as_ref(),
        );
        self.bus.publish(&received).await;
        tracing::info!(
            message = %message.id(),
            conversation = %conversation.id(),
            role = %message.role(),
            "recorded inbound message",
        );

        if role == Role::User
            && let Some(generation) = &self.generation
        {
            self.generate_reply(conversation.id(), &message, generation)
                .await?;
        }
        Ok(message)
    }

    /// Finds a conversation by identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn conversation(
        &self,
        id: ConversationId,
    ) -> ProcessorResult<Option<Conversation>> {
        Ok(self.messages.find_conversation(id).await?)
    }

    /// Returns a page of a conversation's messages in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn conversation_messages(
        &self,
        id: ConversationId,
        offset: usize,
        limit: usize,
    ) -> ProcessorResult<Vec<Message>> {
        Ok(self.messages.conversation_messages(id, offset, limit).await?)
    }

    /// Returns a page of conversations in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn conversations(
        &self,
        offset: usize,
        limit: usize,
    ) -> ProcessorResult<Vec<Conversation>> {
        Ok(self.messages.list_conversations(offset, limit).await?)
    }

    async fn resolve_conversation(
        &self,
        conversation_id: Option<ConversationId>,
        metadata: &Map<String, Value>,
    ) -> ProcessorResult<Conversation> {
        if let Some(id) = conversation_id
            && let Some(conversation) = self.messages.find_conversation(id).await?
        {
            return Ok(conversation);
        }
        let conversation = Conversation::new(metadata.clone(), self.clock.as_ref());
        self.messages.create_conversation(&conversation).await?;
        tracing::debug!(conversation = %conversation.id(), "created conversation");
        Ok(conversation)
    }

    async fn generate_reply(
        &self,
        conversation_id: ConversationId,
        user_message: &Message,
        generation: &GenerationService<C>,
    ) -> ProcessorResult<()> {
        let history = self
            .messages
            .conversation_messages(conversation_id, 0, HISTORY_LIMIT)
            .await?;
        let context: Vec<ContextEntry> = history
            .iter()
            .map(|message| ContextEntry::new(message.role(), message.content()))
            .collect();

        let completion = generation.generate(user_message.content(), &context).await?;

        let mut metadata = Map::new();
        metadata.insert(
            "model".to_owned(),
            completion.model().map_or(Value::Null, |model| {
                Value::String(model.to_owned())
            }),
        );
        metadata.insert(
            "tokens_used".to_owned(),
            completion.tokens_used().map_or(Value::Null, Value::from),
        );

        let reply = Message::new(
            Role::Assistant,
            completion.content(),
            conversation_id,
            metadata,
            self.clock.as_ref(),
        )?;
        self.messages.create_message(&reply).await?;
        self.messages
            .append_to_conversation(conversation_id, &reply)
            .await?;

        let processed = DomainEvent::message_processed(
            user_message.id(),
            reply.content(),
            self.clock.as_ref(),
        );
        self.bus.publish(&processed).await;
        tracing::info!(
            message = %user_message.id(),
            reply = %reply.id(),
            "generated reply",
        );
        Ok(())
    }
}
