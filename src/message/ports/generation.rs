//! Generation port for producing assistant replies.

use crate::message::domain::Role;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors returned by generation client implementations.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The provider rejected or failed the request.
    #[error("generation provider failure: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl GenerationError {
    /// Wraps a provider failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }

    /// Creates a provider failure from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Provider(Arc::new(std::io::Error::other(message.into())))
    }
}

/// One entry of conversation history handed to the provider as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    role: Role,
    content: String,
}

impl ContextEntry {
    /// Creates a context entry.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Returns the author role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the entry content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    content: String,
    model: Option<String>,
    tokens_used: Option<u64>,
}

impl Completion {
    /// Creates a completion with content only.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            tokens_used: None,
        }
    }

    /// Sets the model that produced the completion.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the token usage reported by the provider.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens: u64) -> Self {
        self.tokens_used = Some(tokens);
        self
    }

    /// Returns the generated content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the producing model, when reported.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the token usage, when reported.
    #[must_use]
    pub const fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }
}

/// Provider-agnostic reply generation contract.
///
/// Streaming and embeddings are provider concerns outside this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generates a reply to `prompt` given ordered conversation context.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the provider fails.
    async fn generate(
        &self,
        prompt: &str,
        context: &[ContextEntry],
    ) -> GenerationResult<Completion>;

    /// Probes provider availability.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the probe itself fails.
    async fn health_check(&self) -> GenerationResult<bool>;
}
