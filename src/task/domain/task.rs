//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskKind, TaskStatus};
use crate::agent::domain::AgentId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PRIORITY_KEY: &str = "priority";
const REQUIRED_CAPABILITIES_KEY: &str = "required_capabilities";

/// Task aggregate root.
///
/// Every state change is validated against [`TaskStatus::can_transition_to`]
/// before it is applied. `assigned_agent` is written exactly once, by a
/// successful [`Task::assign_to`]; `result` and `error` are written only by
/// the matching terminal transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    kind: TaskKind,
    status: TaskStatus,
    payload: Map<String, Value>,
    assigned_agent: Option<AgentId>,
    result: Option<Map<String, Value>>,
    error: Option<String>,
    metadata: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPayload`] when the payload carries no
    /// entries.
    pub fn new(
        kind: TaskKind,
        payload: Map<String, Value>,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if payload.is_empty() {
            return Err(TaskDomainError::EmptyPayload);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            kind,
            status: TaskStatus::Created,
            payload,
            assigned_agent: None,
            result: None,
            error: None,
            metadata,
            created_at: timestamp,
            updated_at: timestamp,
            started_at: None,
            completed_at: None,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the work payload.
    #[must_use]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Returns the assigned agent, when one has been bound.
    #[must_use]
    pub const fn assigned_agent(&self) -> Option<AgentId> {
        self.assigned_agent
    }

    /// Returns the completion result, when the task completed successfully.
    #[must_use]
    pub const fn result(&self) -> Option<&Map<String, Value>> {
        self.result.as_ref()
    }

    /// Returns the failure message, when the task failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
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

    /// Returns when execution started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task reached a terminal status, if it has.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the scheduling priority folded into metadata (default 0).
    #[must_use]
    pub fn priority(&self) -> i64 {
        self.metadata
            .get(PRIORITY_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    /// Returns the capability names required of an executing agent, when
    /// declared in metadata.
    #[must_use]
    pub fn required_capabilities(&self) -> Option<Vec<String>> {
        let entries = self.metadata.get(REQUIRED_CAPABILITIES_KEY)?.as_array()?;
        Some(
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Returns whether the task has reached a terminal status.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Binds the task to an agent, moving it to [`TaskStatus::Assigned`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is in
    /// [`TaskStatus::Created`].
    pub fn assign_to(&mut self, agent: AgentId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Assigned)?;
        self.assigned_agent = Some(agent);
        self.status = TaskStatus::Assigned;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to [`TaskStatus::InProgress`], stamping `started_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is in
    /// [`TaskStatus::Created`] or [`TaskStatus::Assigned`].
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::InProgress)?;
        self.status = TaskStatus::InProgress;
        self.started_at = Some(clock.utc());
        self.touch(clock);
        Ok(())
    }

    /// Finishes the task successfully, recording its result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is in
    /// [`TaskStatus::InProgress`].
    pub fn complete(
        &mut self,
        result: Map<String, Value>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        self.status = TaskStatus::Completed;
        self.result = Some(result);
        self.completed_at = Some(clock.utc());
        self.touch(clock);
        Ok(())
    }

    /// Finishes the task with an error message.
    ///
    /// Legal from any non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task already
    /// reached a terminal status.
    pub fn fail(
        &mut self,
        error: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Failed)?;
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(clock.utc());
        self.touch(clock);
        Ok(())
    }

    /// Withdraws the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task already
    /// reached a terminal status.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Cancelled)?;
        self.status = TaskStatus::Cancelled;
        self.completed_at = Some(clock.utc());
        self.touch(clock);
        Ok(())
    }

    const fn ensure_transition(&self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
