//! Repository port for task persistence and discovery.

use crate::agent::domain::AgentId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing operations iterate tasks in insertion order so scheduling sweeps
/// are deterministic.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns a page of tasks in insertion order.
    async fn list(&self, offset: usize, limit: usize) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// Returns `true` when a task was removed; deleting an unknown
    /// identifier is a no-op returning `false`.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns all tasks with the given status, in insertion order.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to the given agent, in insertion order.
    async fn find_by_agent(&self, agent: AgentId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks awaiting execution (`Created` or `Assigned`), in
    /// insertion order.
    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
