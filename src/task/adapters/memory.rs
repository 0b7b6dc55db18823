//! In-memory task repository.

use crate::agent::domain::AgentId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory task repository.
///
/// Tasks are held in insertion order so listing and scheduling sweeps are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<Vec<Task>>>,
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.iter().find(|task| task.id() == id).cloned())
    }

    async fn list(&self, offset: usize, limit: usize) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .iter_mut()
            .find(|existing| existing.id() == task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.len();
        state.retain(|task| task.id() != id);
        Ok(state.len() != before)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|task| task.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_agent(&self, agent: AgentId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|task| task.assigned_agent() == Some(agent))
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|task| {
                matches!(task.status(), TaskStatus::Created | TaskStatus::Assigned)
            })
            .cloned()
            .collect())
    }
}
