//! Task creation and scheduling.
//!
//! Provides [`TaskScheduler`] which creates tasks, matches them to
//! available agents through the agent orchestrator, and publishes the
//! matching domain events.

use crate::agent::ports::AgentRepository;
use crate::agent::services::{AgentOrchestrator, OrchestratorError};
use crate::event::bus::EventBus;
use crate::event::domain::DomainEvent;
use crate::task::domain::{ParseTaskKindError, Task, TaskDomainError, TaskId, TaskKind, TaskStatus};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a new task.
///
/// The kind arrives as a string and is validated against [`TaskKind`]
/// during creation. Priority is folded into the task's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    kind: String,
    payload: Map<String, Value>,
    priority: i64,
    metadata: Map<String, Value>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            payload,
            priority: 0,
            metadata: Map::new(),
        }
    }

    /// Sets the scheduling priority (higher runs sooner).
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the open metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Service-level errors for task scheduling.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The requested task kind is not recognised.
    #[error(transparent)]
    UnknownKind(#[from] ParseTaskKindError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Delegated agent orchestration failed.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

/// Result type for task scheduling operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Creates tasks and distributes them to available agents.
///
/// Scheduling is best-effort: a task with no matching agent stays in
/// [`TaskStatus::Created`], which is a normal outcome rather than an error.
#[derive(Clone)]
pub struct TaskScheduler<A, T, C>
where
    A: AgentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    bus: Arc<EventBus>,
    orchestrator: Option<Arc<AgentOrchestrator<A, T, C>>>,
    clock: Arc<C>,
}

impl<A, T, C> TaskScheduler<A, T, C>
where
    A: AgentRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler without agent matching; tasks stay `Created`
    /// until an orchestrator schedules them.
    #[must_use]
    pub const fn new(tasks: Arc<T>, bus: Arc<EventBus>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            bus,
            orchestrator: None,
            clock,
        }
    }

    /// Attaches an agent orchestrator, enabling assignment and
    /// auto-scheduling of newly created tasks.
    #[must_use]
    pub fn with_orchestrator(mut self, orchestrator: Arc<AgentOrchestrator<A, T, C>>) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    /// Creates and persists a new task, publishing `TaskCreated`.
    ///
    /// When an orchestrator is attached the new task is immediately offered
    /// to `schedule_task`; a scheduling failure is logged and does not fail
    /// the creation.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::UnknownKind`] when the requested kind is
    /// not recognised, [`SchedulerError::Domain`] when the payload is empty,
    /// or a repository error when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> SchedulerResult<Task> {
        let CreateTaskRequest {
            kind,
            payload,
            priority,
            mut metadata,
        } = request;
        let kind = TaskKind::try_from(kind.as_str())?;
        metadata.insert("priority".to_owned(), Value::from(priority));

        let task = Task::new(kind, payload, metadata, self.clock.as_ref())?;
        self.tasks.create(&task).await?;

        let event =
            DomainEvent::task_created(task.id(), task.kind(), task.payload(), self.clock.as_ref());
        self.bus.publish(&event).await;
        tracing::info!(task = %task.id(), kind = %task.kind(), "created task");

        if self.orchestrator.is_none() {
            return Ok(task);
        }
        match self.schedule_task(task.id()).await {
            Ok(Some(scheduled)) => Ok(scheduled),
            Ok(None) => Ok(task),
            Err(err) => {
                tracing::warn!(task = %task.id(), %err, "auto-scheduling failed");
                Ok(task)
            }
        }
    }

    /// Offers a task to the first matching available agent.
    ///
    /// Returns `None` when the task does not exist and the task unchanged
    /// when it has left `Created` or no agent matches. On a successful
    /// assignment the task moves to [`TaskStatus::Assigned`] and
    /// `TaskAssigned` is published. An assignment that fails after matching
    /// (for example the agent stopped in between) is logged and leaves the
    /// task unchanged.
    ///
    /// # Errors
    ///
    /// Returns a repository error when lookups fail.
    pub async fn schedule_task(&self, id: TaskId) -> SchedulerResult<Option<Task>> {
        let Some(task) = self.tasks.find_by_id(id).await? else {
            tracing::warn!(task = %id, "cannot schedule unknown task");
            return Ok(None);
        };
        if task.status() != TaskStatus::Created {
            tracing::debug!(task = %id, status = %task.status(), "task already scheduled");
            return Ok(Some(task));
        }
        let Some(orchestrator) = &self.orchestrator else {
            tracing::warn!(task = %id, "no orchestrator attached, task stays pending");
            return Ok(Some(task));
        };

        let required = task.required_capabilities();
        let Some(agent) = orchestrator
            .find_available_agent(required.as_deref())
            .await?
        else {
            tracing::info!(task = %id, "no available agent, task stays pending");
            return Ok(Some(task));
        };

        let mut candidate = task.clone();
        match orchestrator
            .assign_task_to_agent(&mut candidate, agent.id())
            .await
        {
            Ok(()) => {
                let event =
                    DomainEvent::task_assigned(candidate.id(), agent.id(), self.clock.as_ref());
                self.bus.publish(&event).await;
                tracing::info!(task = %id, agent = %agent.id(), "scheduled task");
                Ok(Some(candidate))
            }
            Err(err) => {
                // The matched agent can become unavailable between lookup
                // and assignment; the task stays pending for a later sweep.
                tracing::error!(task = %id, agent = %agent.id(), %err, "assignment failed");
                Ok(Some(task))
            }
        }
    }

    /// Offers every pending task to the available agents.
    ///
    /// Returns the number of tasks that ended the sweep in
    /// [`TaskStatus::Assigned`].
    ///
    /// # Errors
    ///
    /// Returns a repository error when the pending listing fails.
    pub async fn schedule_all_pending(&self) -> SchedulerResult<usize> {
        let pending = self.tasks.list_pending().await?;
        let total = pending.len();
        let mut scheduled = 0;
        for task in pending {
            if let Some(outcome) = self.schedule_task(task.id()).await?
                && outcome.status() == TaskStatus::Assigned
            {
                scheduled += 1;
            }
        }
        tracing::info!(scheduled, total, "pending scheduling sweep finished");
        Ok(scheduled)
    }

    /// Returns all tasks awaiting execution.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn pending_tasks(&self) -> SchedulerResult<Vec<Task>> {
        Ok(self.tasks.list_pending().await?)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn task(&self, id: TaskId) -> SchedulerResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Returns all tasks with the given status.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn tasks_by_status(&self, status: TaskStatus) -> SchedulerResult<Vec<Task>> {
        Ok(self.tasks.find_by_status(status).await?)
    }
}
