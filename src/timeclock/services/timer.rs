//! Single-task timer orchestration: fetch, transition, persist, audit.

use crate::timeclock::{
    domain::{
        ActivityRecord, ManualEntry, OperationName, OrderRef, Task, TaskAction, TaskId,
        TimeclockDomainError, WorkerId,
    },
    ports::{
        ActivityLog, TaskRepository, TaskStoreError, WorkerDirectory, WorkerDirectoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on optimistic-concurrency retries for one action.
const MAX_TRANSITION_ATTEMPTS: u32 = 3;

/// Request payload for assigning a worker to an order/operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    worker_id: WorkerId,
    order_ref: String,
    operation: String,
}

impl AssignTaskRequest {
    /// Creates an assignment request.
    #[must_use]
    pub fn new(
        worker_id: WorkerId,
        order_ref: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            worker_id,
            order_ref: order_ref.into(),
            operation: operation.into(),
        }
    }
}

/// Service-level errors for timer operations.
#[derive(Debug, Error)]
pub enum TaskTimerError {
    /// Domain validation or transition failure.
    #[error(transparent)]
    Domain(#[from] TimeclockDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Worker directory lookup failed.
    #[error(transparent)]
    Directory(#[from] WorkerDirectoryError),
    /// No task with the given identifier exists.
    #[error("no task with id {0}")]
    TaskNotFound(TaskId),
    /// No worker with the given identifier exists.
    #[error("no worker with id {0}")]
    WorkerNotFound(WorkerId),
    /// The worker is on break; start and resume are rejected up front.
    #[error("worker {0} is on break; tasks cannot be started or resumed")]
    WorkerOnBreak(WorkerId),
}

/// Result type for timer service operations.
pub type TaskTimerResult<T> = Result<T, TaskTimerError>;

/// Timer orchestration service.
///
/// Every action re-reads the current task record immediately before
/// mutating and persists through the store's revision check, so two
/// near-simultaneous transitions can never accrue from the same anchor.
#[derive(Clone)]
pub struct TaskTimerService<R, L, W, C>
where
    R: TaskRepository,
    L: ActivityLog,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    activity_log: Arc<L>,
    directory: Arc<W>,
    clock: Arc<C>,
}

impl<R, L, W, C> TaskTimerService<R, L, W, C>
where
    R: TaskRepository,
    L: ActivityLog,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new timer service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        activity_log: Arc<L>,
        directory: Arc<W>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            directory,
            clock,
        }
    }

    /// Assigns a worker to an operation on an order.
    ///
    /// The worker's current hourly rate is snapshotted onto the new
    /// pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] when validation fails, the worker is
    /// unknown, or the store rejects persistence.
    pub async fn assign_task(&self, request: AssignTaskRequest) -> TaskTimerResult<Task> {
        let order_ref = OrderRef::new(request.order_ref)?;
        let operation = OperationName::new(request.operation)?;
        let worker = self
            .directory
            .find_by_id(request.worker_id)
            .await?
            .ok_or(TaskTimerError::WorkerNotFound(request.worker_id))?;

        let task = Task::new(
            request.worker_id,
            order_ref,
            operation,
            worker.hourly_rate,
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Stores a completed backfill record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] when the entry is invalid or the store
    /// rejects persistence.
    pub async fn record_manual_entry(&self, entry: ManualEntry) -> TaskTimerResult<Task> {
        let task = Task::new_manual(entry, &*self.clock)?;
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Performs one timer action on one task.
    ///
    /// `Start` and `Resume` are rejected up front while the worker is on
    /// break. On a revision conflict the action is re-read and re-applied
    /// up to a bounded number of attempts. A successful transition is
    /// followed by a best-effort activity record; audit failures never
    /// surface.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] when the task or worker is unknown, the
    /// transition is illegal from the current status, or the store fails.
    pub async fn perform_action(
        &self,
        task_id: TaskId,
        action: TaskAction,
        reason: Option<String>,
    ) -> TaskTimerResult<Task> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut task = self
                .repository
                .find_by_id(task_id)
                .await?
                .ok_or(TaskTimerError::TaskNotFound(task_id))?;

            if matches!(action, TaskAction::Start | TaskAction::Resume) {
                self.ensure_not_on_break(task.worker_id()).await?;
            }

            let event = task.apply(action, reason.clone(), &*self.clock)?;

            match self.repository.update(&task).await {
                Ok(()) => {
                    let mut entry = ActivityRecord::new(
                        task.worker_id(),
                        event,
                        task.operation().as_str(),
                        self.clock.utc(),
                    )
                    .with_task(task.id());
                    if let Some(details) = reason.as_deref() {
                        entry = entry.with_details(details);
                    }
                    self.record_best_effort(entry).await;
                    return Ok(task);
                }
                Err(TaskStoreError::RevisionConflict { .. })
                    if attempts < MAX_TRANSITION_ATTEMPTS => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Replaces a task's accumulator with an externally-audited value.
    ///
    /// Supports administrative corrections; the edit re-anchors the timer
    /// so future accrual starts from the edit, not before it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] when the task is unknown or the store
    /// fails.
    pub async fn override_active_seconds(
        &self,
        task_id: TaskId,
        seconds: u64,
    ) -> TaskTimerResult<Task> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut task = self
                .repository
                .find_by_id(task_id)
                .await?
                .ok_or(TaskTimerError::TaskNotFound(task_id))?;
            task.override_active_seconds(seconds, &*self.clock);

            match self.repository.update(&task).await {
                Ok(()) => return Ok(task),
                Err(TaskStoreError::RevisionConflict { .. })
                    if attempts < MAX_TRANSITION_ATTEMPTS => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Rejects the action when the task's worker is on break.
    async fn ensure_not_on_break(&self, worker_id: WorkerId) -> TaskTimerResult<()> {
        let worker = self
            .directory
            .find_by_id(worker_id)
            .await?
            .ok_or(TaskTimerError::WorkerNotFound(worker_id))?;
        if worker.availability.is_on_break() {
            return Err(TaskTimerError::WorkerOnBreak(worker_id));
        }
        Ok(())
    }

    /// Records an activity entry, deliberately discarding failures.
    ///
    /// The task's durability takes priority over the audit trail.
    pub(crate) async fn record_best_effort(&self, entry: ActivityRecord) {
        let _outcome = self.activity_log.record(&entry).await;
    }
}
