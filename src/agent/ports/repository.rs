//! Repository port for agent persistence and discovery.

use crate::agent::domain::{Agent, AgentId, AgentStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent repository operations.
pub type AgentRepositoryResult<T> = Result<T, AgentRepositoryError>;

/// Agent persistence contract.
///
/// Listing operations iterate agents in insertion order so first-match
/// selection is deterministic for a given repository state.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Stores a new agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRepositoryError::DuplicateAgent`] when the identifier
    /// already exists.
    async fn create(&self, agent: &Agent) -> AgentRepositoryResult<()>;

    /// Finds an agent by identifier.
    ///
    /// Returns `None` when the agent does not exist.
    async fn find_by_id(&self, id: AgentId) -> AgentRepositoryResult<Option<Agent>>;

    /// Returns a page of agents in insertion order.
    async fn list(&self, offset: usize, limit: usize) -> AgentRepositoryResult<Vec<Agent>>;

    /// Persists changes to an existing agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRepositoryError::NotFound`] when the agent does not
    /// exist.
    async fn update(&self, agent: &Agent) -> AgentRepositoryResult<()>;

    /// Removes an agent.
    ///
    /// Returns `true` when an agent was removed; deleting an unknown
    /// identifier is a no-op returning `false`.
    async fn delete(&self, id: AgentId) -> AgentRepositoryResult<bool>;

    /// Returns all agents with the given status, in insertion order.
    async fn find_by_status(&self, status: AgentStatus) -> AgentRepositoryResult<Vec<Agent>>;

    /// Returns all agents available for assignment, in insertion order.
    async fn list_available(&self) -> AgentRepositoryResult<Vec<Agent>>;
}

/// Errors returned by agent repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AgentRepositoryError {
    /// An agent with the same identifier already exists.
    #[error("duplicate agent identifier: {0}")]
    DuplicateAgent(AgentId),

    /// The agent was not found.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentRepositoryError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
