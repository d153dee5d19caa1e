//! Break cascade: bulk pause/resume driven by worker availability.

use super::timer::{TaskTimerError, TaskTimerResult, TaskTimerService};
use crate::timeclock::{
    domain::{ActivityEvent, ActivityRecord, TaskAction, TaskFilter, TaskId, TaskStatus, WorkerId},
    ports::{ActivityLog, TaskRepository, WorkerDirectory},
};
use mockable::Clock;
use std::sync::Arc;

/// Reason recorded on tasks closed or paused when a shift ends.
pub const SHIFT_END_REASON: &str = "Shift Ended";

/// Per-task failure inside a cascade batch.
#[derive(Debug)]
pub struct CascadeFailure {
    /// Task whose transition failed.
    pub task_id: TaskId,
    /// The failure; the rest of the batch still ran.
    pub error: TaskTimerError,
}

/// Summary of a best-effort cascade over one worker's tasks.
///
/// The cascade processes tasks independently and sequentially; one
/// failure never aborts the remaining tasks.
#[derive(Debug, Default)]
pub struct CascadeReport {
    succeeded: Vec<TaskId>,
    failures: Vec<CascadeFailure>,
}

impl CascadeReport {
    /// Tasks whose transition applied.
    #[must_use]
    pub fn succeeded(&self) -> &[TaskId] {
        &self.succeeded
    }

    /// Tasks whose transition failed.
    #[must_use]
    pub fn failures(&self) -> &[CascadeFailure] {
        &self.failures
    }

    /// Returns whether every task in the batch transitioned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn push(&mut self, task_id: TaskId, outcome: TaskTimerResult<()>) {
        match outcome {
            Ok(()) => self.succeeded.push(task_id),
            Err(error) => self.failures.push(CascadeFailure { task_id, error }),
        }
    }
}

/// Cascade controller applying the single-task state machine across all
/// of one worker's tasks when their availability or shift status changes.
pub struct BreakCascadeService<R, L, W, C>
where
    R: TaskRepository,
    L: ActivityLog,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    timer: TaskTimerService<R, L, W, C>,
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, L, W, C> BreakCascadeService<R, L, W, C>
where
    R: TaskRepository,
    L: ActivityLog,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new cascade service sharing ports with a timer service.
    #[must_use]
    pub fn new(repository: Arc<R>, activity_log: Arc<L>, directory: Arc<W>, clock: Arc<C>) -> Self {
        let timer = TaskTimerService::new(
            Arc::clone(&repository),
            activity_log,
            directory,
            Arc::clone(&clock),
        );
        Self {
            timer,
            repository,
            clock,
        }
    }

    /// Auto-pauses every task the worker is currently running.
    ///
    /// Tasks already manually paused are left untouched. Records a
    /// `break_start` trail entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] only when the initial task listing
    /// fails; per-task failures land in the report.
    pub async fn pause_all_active(
        &self,
        worker_id: WorkerId,
        reason: Option<String>,
    ) -> TaskTimerResult<CascadeReport> {
        let filter = TaskFilter::for_worker(worker_id).with_status(TaskStatus::Active);
        let tasks = self.repository.list(&filter).await?;

        let mut report = CascadeReport::default();
        for task in &tasks {
            let outcome = self
                .timer
                .perform_action(task.id(), TaskAction::AutoPause, reason.clone())
                .await;
            report.push(task.id(), outcome.map(|_| ()));
        }

        self.record_worker_event(worker_id, ActivityEvent::BreakStart, "Break started", reason)
            .await;
        Ok(report)
    }

    /// Resumes every task this cascade previously auto-paused.
    ///
    /// Only tasks in `break` status are touched; a manually paused task
    /// must be resumed by the worker explicitly. Records a `break_end`
    /// trail entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] only when the initial task listing
    /// fails.
    pub async fn resume_all_auto_paused(
        &self,
        worker_id: WorkerId,
    ) -> TaskTimerResult<CascadeReport> {
        let filter = TaskFilter::for_worker(worker_id).with_status(TaskStatus::Break);
        let tasks = self.repository.list(&filter).await?;

        let mut report = CascadeReport::default();
        for task in &tasks {
            let outcome = self
                .timer
                .perform_action(task.id(), TaskAction::AutoResume, None)
                .await;
            report.push(task.id(), outcome.map(|_| ()));
        }

        self.record_worker_event(worker_id, ActivityEvent::BreakEnd, "Break ended", None)
            .await;
        Ok(report)
    }

    /// Completes every non-completed task the worker owns.
    ///
    /// Used when a worker ends their shift and the site auto-closes open
    /// work. Records a `clock_out` trail entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] only when the initial task listing
    /// fails.
    pub async fn complete_all(&self, worker_id: WorkerId) -> TaskTimerResult<CascadeReport> {
        let tasks = self
            .repository
            .list(&TaskFilter::for_worker(worker_id))
            .await?;

        let mut report = CascadeReport::default();
        for task in &tasks {
            if task.status().is_terminal() {
                continue;
            }
            let outcome = self
                .timer
                .perform_action(
                    task.id(),
                    TaskAction::Complete,
                    Some(SHIFT_END_REASON.to_owned()),
                )
                .await;
            report.push(task.id(), outcome.map(|_| ()));
        }

        self.record_worker_event(worker_id, ActivityEvent::ClockOut, "Shift ended", None)
            .await;
        Ok(report)
    }

    /// Manually pauses every running or break task instead of closing it.
    ///
    /// The shift-end variant for sites that prefer not to auto-complete
    /// open work. Records a `clock_out` trail entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTimerError`] only when the initial task listing
    /// fails.
    pub async fn pause_all_manual(&self, worker_id: WorkerId) -> TaskTimerResult<CascadeReport> {
        let tasks = self
            .repository
            .list(&TaskFilter::for_worker(worker_id))
            .await?;

        let mut report = CascadeReport::default();
        for task in &tasks {
            if !matches!(task.status(), TaskStatus::Active | TaskStatus::Break) {
                continue;
            }
            let outcome = self
                .timer
                .perform_action(
                    task.id(),
                    TaskAction::Pause,
                    Some(SHIFT_END_REASON.to_owned()),
                )
                .await;
            report.push(task.id(), outcome.map(|_| ()));
        }

        self.record_worker_event(worker_id, ActivityEvent::ClockOut, "Shift ended", None)
            .await;
        Ok(report)
    }

    /// Best-effort worker-level trail entry for the cascade itself.
    async fn record_worker_event(
        &self,
        worker_id: WorkerId,
        event: ActivityEvent,
        description: &str,
        details: Option<String>,
    ) {
        let mut entry = ActivityRecord::new(worker_id, event, description, self.clock.utc());
        if let Some(detail) = details {
            entry = entry.with_details(detail);
        }
        self.timer.record_best_effort(entry).await;
    }
}
