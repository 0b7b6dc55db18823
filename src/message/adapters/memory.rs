//! In-memory message repository.

use crate::message::domain::{Conversation, ConversationId, Message, MessageId};
use crate::message::ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory message repository.
///
/// Conversations own their message history, so appends restamp
/// `updated_at` through the conversation aggregate.
#[derive(Debug, Clone)]
pub struct InMemoryMessageRepository<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<State>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct State {
    messages: Vec<Message>,
    conversations: Vec<Conversation>,
}

fn poisoned(err: impl std::fmt::Display) -> MessageRepositoryError {
    MessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl<C> InMemoryMessageRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            clock,
        }
    }
}

#[async_trait]
impl<C> MessageRepository for InMemoryMessageRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create_message(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state
            .messages
            .iter()
            .any(|existing| existing.id() == message.id())
        {
            return Err(MessageRepositoryError::DuplicateMessage(message.id()));
        }
        state.messages.push(message.clone());
        Ok(())
    }

    async fn find_message(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .messages
            .iter()
            .find(|message| message.id() == id)
            .cloned())
    }

    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state
            .conversations
            .iter()
            .any(|existing| existing.id() == conversation.id())
        {
            return Err(MessageRepositoryError::DuplicateConversation(
                conversation.id(),
            ));
        }
        state.conversations.push(conversation.clone());
        Ok(())
    }

    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> MessageRepositoryResult<Option<Conversation>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .conversations
            .iter()
            .find(|conversation| conversation.id() == id)
            .cloned())
    }

    async fn conversation_messages(
        &self,
        id: ConversationId,
        offset: usize,
        limit: usize,
    ) -> MessageRepositoryResult<Vec<Message>> {
        let state = self.state.read().map_err(poisoned)?;
        let Some(conversation) = state
            .conversations
            .iter()
            .find(|conversation| conversation.id() == id)
        else {
            return Ok(Vec::new());
        };
        Ok(conversation
            .messages()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn append_to_conversation(
        &self,
        id: ConversationId,
        message: &Message,
    ) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let conversation = state
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id() == id)
            .ok_or(MessageRepositoryError::ConversationNotFound(id))?;
        conversation.add_message(message.clone(), self.clock.as_ref());
        Ok(())
    }

    async fn list_conversations(
        &self,
        offset: usize,
        limit: usize,
    ) -> MessageRepositoryResult<Vec<Conversation>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .conversations
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
