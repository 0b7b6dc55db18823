//! Repository port for message and conversation persistence.

use crate::message::domain::{Conversation, ConversationId, Message, MessageId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message and conversation persistence contract.
///
/// Conversation histories keep insertion order; paging operations are
/// offset/limit windows over that order.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::DuplicateMessage`] when the
    /// identifier already exists.
    async fn create_message(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Finds a message by identifier.
    ///
    /// Returns `None` when the message does not exist.
    async fn find_message(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>>;

    /// Stores a new conversation.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::DuplicateConversation`] when the
    /// identifier already exists.
    async fn create_conversation(&self, conversation: &Conversation)
    -> MessageRepositoryResult<()>;

    /// Finds a conversation by identifier.
    ///
    /// Returns `None` when the conversation does not exist.
    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> MessageRepositoryResult<Option<Conversation>>;

    /// Returns a page of a conversation's messages in insertion order.
    ///
    /// An unknown conversation yields an empty page.
    async fn conversation_messages(
        &self,
        id: ConversationId,
        offset: usize,
        limit: usize,
    ) -> MessageRepositoryResult<Vec<Message>>;

    /// Appends a message to a conversation's history.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::ConversationNotFound`] when the
    /// conversation does not exist.
    async fn append_to_conversation(
        &self,
        id: ConversationId,
        message: &Message,
    ) -> MessageRepositoryResult<()>;

    /// Returns a page of conversations in insertion order.
    async fn list_conversations(
        &self,
        offset: usize,
        limit: usize,
    ) -> MessageRepositoryResult<Vec<Conversation>>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// A conversation with the same identifier already exists.
    #[error("duplicate conversation identifier: {0}")]
    DuplicateConversation(ConversationId),

    /// The conversation was not found.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
