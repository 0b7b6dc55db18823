//! Agent lifecycle orchestration.
//!
//! Provides [`AgentOrchestrator`] which coordinates agent creation, status
//! changes, availability lookups, and task assignment, publishing the
//! matching domain events.

use crate::agent::domain::{
    Agent, AgentId, AgentKind, AgentStatus, CapabilitySet, ParseAgentKindError,
};
use crate::agent::ports::{AgentRepository, AgentRepositoryError};
use crate::event::bus::EventBus;
use crate::event::domain::DomainEvent;
use crate::task::domain::{Task, TaskDomainError};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a new agent.
///
/// The kind arrives as a string and is validated against [`AgentKind`]
/// during creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAgentRequest {
    name: String,
    kind: String,
    capabilities: CapabilitySet,
    metadata: Map<String, Value>,
}

impl CreateAgentRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            capabilities: CapabilitySet::new(),
            metadata: Map::new(),
        }
    }

    /// Sets the capability declarations.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the open metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Service-level errors for agent orchestration.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The requested agent kind is not recognised.
    #[error(transparent)]
    UnknownKind(#[from] ParseAgentKindError),

    /// The referenced agent does not exist.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// The agent is not in a status that permits task assignment.
    #[error("agent {agent} is unavailable for assignment (status: {status})")]
    AgentUnavailable {
        /// The agent that rejected the assignment.
        agent: AgentId,
        /// Its status at the time of the attempt.
        status: AgentStatus,
    },

    /// A task state transition was rejected.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// Agent persistence failed.
    #[error(transparent)]
    AgentRepository(#[from] AgentRepositoryError),

    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for agent orchestration operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Coordinates agent lifecycle and task assignment.
pub struct AgentOrchestrator<A, T, C>
where
    A: AgentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    agents: Arc<A>,
    tasks: Arc<T>,
    bus: Arc<EventBus>,
    clock: Arc<C>,
}

impl<A, T, C> Clone for AgentOrchestrator<A, T, C>
where
    A: AgentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            agents: Arc::clone(&self.agents),
            tasks: Arc::clone(&self.tasks),
            bus: Arc::clone(&self.bus),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, T, C> AgentOrchestrator<A, T, C>
where
    A: AgentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub const fn new(agents: Arc<A>, tasks: Arc<T>, bus: Arc<EventBus>, clock: Arc<C>) -> Self {
        Self {
            agents,
            tasks,
            bus,
            clock,
        }
    }

    /// Creates and persists a new agent, publishing `AgentCreated`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::UnknownKind`] when the requested kind is
    /// not recognised, or a repository error when persistence fails.
    pub async fn create_agent(&self, request: CreateAgentRequest) -> OrchestratorResult<Agent> {
        let CreateAgentRequest {
            name,
            kind,
            capabilities,
            metadata,
        } = request;
        let kind = AgentKind::try_from(kind.as_str())?;
        let agent = Agent::new(name, kind, capabilities, metadata, self.clock.as_ref());
        self.agents.create(&agent).await?;

        let event = DomainEvent::agent_created(
            agent.id(),
            agent.name(),
            agent.kind(),
            agent.capabilities(),
            self.clock.as_ref(),
        );
        self.bus.publish(&event).await;

        tracing::info!(agent = %agent.id(), name = agent.name(), "created agent");
        Ok(agent)
    }

    /// Finds an agent by identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn agent(&self, id: AgentId) -> OrchestratorResult<Option<Agent>> {
        Ok(self.agents.find_by_id(id).await?)
    }

    /// Returns a page of agents in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn agents(&self, offset: usize, limit: usize) -> OrchestratorResult<Vec<Agent>> {
        Ok(self.agents.list(offset, limit).await?)
    }

    /// Moves an agent to a new lifecycle status.
    ///
    /// A same-status update is idempotent: the agent is returned unchanged
    /// and no event is published. Otherwise the change is persisted and
    /// `AgentStatusChanged` is published.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::NotFound`] when the agent does not
    /// exist, or a repository error when persistence fails.
    pub async fn update_agent_status(
        &self,
        id: AgentId,
        status: AgentStatus,
        reason: Option<&str>,
    ) -> OrchestratorResult<Agent> {
        let mut agent = self
            .agents
            .find_by_id(id)
            .await?
            .ok_or(OrchestratorError::NotFound(id))?;

        let old_status = agent.status();
        let changed = agent.change_status(status, self.clock.as_ref());
        self.agents.update(&agent).await?;

        if changed {
            let event = DomainEvent::agent_status_changed(
                agent.id(),
                old_status,
                status,
                reason,
                self.clock.as_ref(),
            );
            self.bus.publish(&event).await;
            tracing::info!(agent = %id, from = %old_status, to = %status, "agent status changed");
        }
        Ok(agent)
    }

    /// Finds the first available agent satisfying a capability filter.
    ///
    /// Availability means [`AgentStatus::Active`] or [`AgentStatus::Idle`].
    /// With no filter (or an empty one) the first available agent wins;
    /// with a filter, the first agent whose capability set contains every
    /// required name wins. First-match is a deliberate policy choice over
    /// load balancing.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the availability query fails.
    pub async fn find_available_agent(
        &self,
        required_capabilities: Option<&[String]>,
    ) -> OrchestratorResult<Option<Agent>> {
        let available = self.agents.list_available().await?;
        let Some(required) = required_capabilities.filter(|names| !names.is_empty()) else {
            return Ok(available.into_iter().next());
        };
        Ok(available
            .into_iter()
            .find(|agent| agent.capabilities().contains_all(required)))
    }

    /// Assigns a task to an agent and persists the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::NotFound`] when the agent does not
    /// exist, [`OrchestratorError::AgentUnavailable`] when it cannot accept
    /// work, [`OrchestratorError::Task`] when the task is not in a status
    /// that permits assignment, or a repository error when persistence
    /// fails.
    pub async fn assign_task_to_agent(
        &self,
        task: &mut Task,
        agent_id: AgentId,
    ) -> OrchestratorResult<()> {
        let agent = self
            .agents
            .find_by_id(agent_id)
            .await?
            .ok_or(OrchestratorError::NotFound(agent_id))?;

        if !agent.is_available() {
            return Err(OrchestratorError::AgentUnavailable {
                agent: agent_id,
                status: agent.status(),
            });
        }

        task.assign_to(agent_id, self.clock.as_ref())?;
        self.tasks.update(task).await?;
        tracing::info!(task = %task.id(), agent = %agent_id, "task assigned to agent");
        Ok(())
    }

    /// Returns the tasks assigned to an agent.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn agent_tasks(&self, agent_id: AgentId) -> OrchestratorResult<Vec<Task>> {
        Ok(self.tasks.find_by_agent(agent_id).await?)
    }
}
