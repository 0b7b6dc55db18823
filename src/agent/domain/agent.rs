//! Agent aggregate root.

use super::{AgentId, AgentKind, AgentStatus, CapabilitySet};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Agent aggregate root.
///
/// Agents begin life in [`AgentStatus::Created`] and move through the
/// lifecycle via [`Agent::change_status`]. All mutation flows through the
/// orchestration service; repositories persist whole aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    name: String,
    kind: AgentKind,
    status: AgentStatus,
    capabilities: CapabilitySet,
    metadata: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Agent {
    /// Creates a new agent in [`AgentStatus::Created`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: AgentKind,
        capabilities: CapabilitySet,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AgentId::new(),
            name: name.into(),
            kind,
            status: AgentStatus::Created,
            capabilities,
            metadata,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Returns the agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the agent kind.
    #[must_use]
    pub const fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns the declared capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns the open metadata map.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
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

    /// Returns whether the agent can accept new task assignments.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Moves the agent to a new lifecycle status.
    ///
    /// Returns `true` when the status actually changed. A same-status change
    /// is a silent no-op: the aggregate is untouched and `updated_at` keeps
    /// its previous value.
    pub fn change_status(&mut self, status: AgentStatus, clock: &impl Clock) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.touch(clock);
        true
    }

    /// Declares or replaces a capability.
    pub fn add_capability(&mut self, name: impl Into<String>, value: Value, clock: &impl Clock) {
        self.capabilities.insert(name, value);
        self.touch(clock);
    }

    /// Removes a capability, returning its value when present.
    pub fn remove_capability(&mut self, name: &str, clock: &impl Clock) -> Option<Value> {
        let removed = self.capabilities.remove(name);
        if removed.is_some() {
            self.touch(clock);
        }
        removed
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
