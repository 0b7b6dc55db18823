//! In-memory agent repository.

use crate::agent::domain::{Agent, AgentId, AgentStatus};
use crate::agent::ports::{AgentRepository, AgentRepositoryError, AgentRepositoryResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory agent repository.
///
/// Agents are held in insertion order so listing and availability queries
/// are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentRepository {
    state: Arc<RwLock<Vec<Agent>>>,
}

fn poisoned(err: impl std::fmt::Display) -> AgentRepositoryError {
    AgentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryAgentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn create(&self, agent: &Agent) -> AgentRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.iter().any(|existing| existing.id() == agent.id()) {
            return Err(AgentRepositoryError::DuplicateAgent(agent.id()));
        }
        state.push(agent.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AgentId) -> AgentRepositoryResult<Option<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.iter().find(|agent| agent.id() == id).cloned())
    }

    async fn list(&self, offset: usize, limit: usize) -> AgentRepositoryResult<Vec<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn update(&self, agent: &Agent) -> AgentRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .iter_mut()
            .find(|existing| existing.id() == agent.id())
            .ok_or(AgentRepositoryError::NotFound(agent.id()))?;
        *slot = agent.clone();
        Ok(())
    }

    async fn delete(&self, id: AgentId) -> AgentRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.len();
        state.retain(|agent| agent.id() != id);
        Ok(state.len() != before)
    }

    async fn find_by_status(&self, status: AgentStatus) -> AgentRepositoryResult<Vec<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|agent| agent.status() == status)
            .cloned()
            .collect())
    }

    async fn list_available(&self) -> AgentRepositoryResult<Vec<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|agent| agent.is_available())
            .cloned()
            .collect())
    }
}
