//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::timeclock::{
    domain::{Task, TaskFilter, TaskId},
    ports::{TaskRepository, TaskStoreError, TaskStoreResult},
};

/// In-memory task store with the same optimistic-concurrency contract as
/// the `PostgreSQL` adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state
            .get(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?;

        // The submitted task must be exactly one transition ahead of the
        // stored record; anything else raced against a concurrent caller.
        if task.revision() != stored.revision() + 1 {
            return Err(TaskStoreError::RevisionConflict {
                task_id: task.id(),
                submitted: task.revision(),
                stored: stored.revision(),
            });
        }

        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        // Deterministic ordering for callers iterating cascade batches.
        tasks.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(tasks)
    }
}
