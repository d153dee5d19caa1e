//! Repository port for task persistence and filtered lookup.

use crate::timeclock::domain::{Task, TaskFilter, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// The store is the single shared mutable resource; transitions on the
/// same task are serialized through the revision check on [`update`],
/// never through in-memory locks.
///
/// [`update`]: TaskRepository::update
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists a transitioned task.
    ///
    /// The write succeeds only when the stored revision is exactly one
    /// behind the submitted task's, so a transition computed against a
    /// stale accrual anchor is rejected rather than silently corrupting
    /// the accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist
    /// or [`TaskStoreError::RevisionConflict`] when another caller won
    /// the race.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task satisfying the filter.
    async fn list(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Another caller transitioned the task first.
    #[error("stale revision for task {task_id}: submitted {submitted}, stored {stored}")]
    RevisionConflict {
        /// Task whose update was rejected.
        task_id: TaskId,
        /// Revision carried by the rejected update.
        submitted: u64,
        /// Revision currently in the store.
        stored: u64,
    },

    /// The store could not be reached; the transition must not be assumed
    /// to have applied.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence-layer failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
