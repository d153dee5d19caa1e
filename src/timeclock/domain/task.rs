//! Task aggregate root and the timer state machine.

use super::{
    ActivityEvent, OperationName, OrderRef, ParseTaskStatusError, TaskId, TimeclockDomainError,
    WorkerId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason recorded on tasks paused by the break cascade when the caller
/// supplies none.
pub const DEFAULT_BREAK_REASON: &str = "Worker on Break";

/// Timer status of a tracked task.
///
/// `Break` is a distinct auto-paused status so the break cascade can
/// resume its own pauses without ever resuming a manual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Assigned but the timer has never run.
    Pending,
    /// The timer is running; wall-clock time accrues from the anchor.
    Active,
    /// Manually paused by the worker or a supervisor.
    Paused,
    /// Auto-paused because the worker went on break.
    Break,
    /// Finished; terminal.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Break => "break",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns whether `action` is legal from this status.
    ///
    /// This is the exhaustive transition table; every (status, action)
    /// pair not listed here fails closed.
    #[must_use]
    pub const fn permits(self, action: TaskAction) -> bool {
        matches!(
            (self, action),
            (Self::Pending, TaskAction::Start | TaskAction::Complete)
                | (
                    Self::Active,
                    TaskAction::Pause | TaskAction::AutoPause | TaskAction::Complete
                )
                | (Self::Paused, TaskAction::Resume | TaskAction::Complete)
                | (
                    Self::Break,
                    TaskAction::Pause | TaskAction::AutoResume | TaskAction::Complete
                )
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "break" => Ok(Self::Break),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Input action to the timer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Begin work on a pending task.
    Start,
    /// Resume a manually paused task.
    Resume,
    /// Manually pause a running task.
    Pause,
    /// Pause a running task because its worker went on break.
    AutoPause,
    /// Resume a task the break cascade paused.
    AutoResume,
    /// Finish the task from any non-terminal status.
    Complete,
}

impl TaskAction {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::AutoPause => "auto_pause",
            Self::AutoResume => "auto_resume",
            Self::Complete => "complete",
        }
    }

    /// Returns the activity-trail event a successful transition records.
    ///
    /// Cascade actions log as their manual counterparts; the audit trail
    /// does not distinguish who pressed the button.
    #[must_use]
    pub const fn event(self) -> ActivityEvent {
        match self {
            Self::Start => ActivityEvent::TaskStart,
            Self::Resume | Self::AutoResume => ActivityEvent::TaskResume,
            Self::Pause | Self::AutoPause => ActivityEvent::TaskPause,
            Self::Complete => ActivityEvent::TaskComplete,
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Task aggregate root.
///
/// A task is one worker's time-tracked assignment to one operation on
/// one manufacturing order. `active_seconds` is the authoritative record
/// of work performed; it only ever grows, and only when a transition
/// moves the task out of [`TaskStatus::Active`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    worker_id: WorkerId,
    order_ref: OrderRef,
    operation: OperationName,
    status: TaskStatus,
    hourly_rate: Decimal,
    active_seconds: u64,
    start_time: Option<DateTime<Utc>>,
    last_action_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    reason: Option<String>,
    manual: bool,
    revision: u64,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted assigned worker.
    pub worker_id: WorkerId,
    /// Persisted manufacturing-order reference.
    pub order_ref: OrderRef,
    /// Persisted operation name.
    pub operation: OperationName,
    /// Persisted timer status.
    pub status: TaskStatus,
    /// Persisted hourly-rate snapshot.
    pub hourly_rate: Decimal,
    /// Persisted active-seconds accumulator.
    pub active_seconds: u64,
    /// Persisted first-start timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Persisted accrual anchor.
    pub last_action_time: Option<DateTime<Utc>>,
    /// Persisted completion timestamp.
    pub end_time: Option<DateTime<Utc>>,
    /// Persisted pause reason.
    pub reason: Option<String>,
    /// Persisted backfill flag.
    pub manual: bool,
    /// Persisted optimistic-concurrency revision.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Parameter object for a backfilled (manually entered) task record.
///
/// Manual entries bypass the live timer entirely: the accumulator is
/// supplied by the operator and no live accrual invariants apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    /// Worker the record is attributed to.
    pub worker_id: WorkerId,
    /// Manufacturing-order reference.
    pub order_ref: OrderRef,
    /// Operation name.
    pub operation: OperationName,
    /// Hourly-rate snapshot for costing.
    pub hourly_rate: Decimal,
    /// Operator-supplied active seconds.
    pub active_seconds: u64,
    /// When the work started.
    pub start_time: DateTime<Utc>,
    /// When the work ended.
    pub end_time: DateTime<Utc>,
    /// Optional note attached to the record.
    pub reason: Option<String>,
}

impl Task {
    /// Creates a new pending task assignment.
    ///
    /// The hourly rate is snapshotted here so historical cost stays
    /// stable even if the worker's rate changes later.
    ///
    /// # Errors
    ///
    /// Returns [`TimeclockDomainError::NegativeHourlyRate`] when the rate
    /// is negative.
    pub fn new(
        worker_id: WorkerId,
        order_ref: OrderRef,
        operation: OperationName,
        hourly_rate: Decimal,
        clock: &impl Clock,
    ) -> Result<Self, TimeclockDomainError> {
        if hourly_rate.is_sign_negative() {
            return Err(TimeclockDomainError::NegativeHourlyRate(hourly_rate));
        }

        Ok(Self {
            id: TaskId::new(),
            worker_id,
            order_ref,
            operation,
            status: TaskStatus::Pending,
            hourly_rate,
            active_seconds: 0,
            start_time: None,
            last_action_time: None,
            end_time: None,
            reason: None,
            manual: false,
            revision: 0,
            created_at: clock.utc(),
        })
    }

    /// Creates a completed backfill record from a manual entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimeclockDomainError::NegativeHourlyRate`] for a negative
    /// rate or [`TimeclockDomainError::ManualEntryEndsBeforeStart`] when
    /// the end time precedes the start time.
    pub fn new_manual(entry: ManualEntry, clock: &impl Clock) -> Result<Self, TimeclockDomainError> {
        if entry.hourly_rate.is_sign_negative() {
            return Err(TimeclockDomainError::NegativeHourlyRate(entry.hourly_rate));
        }
        if entry.end_time < entry.start_time {
            return Err(TimeclockDomainError::ManualEntryEndsBeforeStart);
        }

        Ok(Self {
            id: TaskId::new(),
            worker_id: entry.worker_id,
            order_ref: entry.order_ref,
            operation: entry.operation,
            status: TaskStatus::Completed,
            hourly_rate: entry.hourly_rate,
            active_seconds: entry.active_seconds,
            start_time: Some(entry.start_time),
            last_action_time: Some(entry.end_time),
            end_time: Some(entry.end_time),
            reason: entry.reason,
            manual: true,
            revision: 0,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            worker_id: data.worker_id,
            order_ref: data.order_ref,
            operation: data.operation,
            status: data.status,
            hourly_rate: data.hourly_rate,
            active_seconds: data.active_seconds,
            start_time: data.start_time,
            last_action_time: data.last_action_time,
            end_time: data.end_time,
            reason: data.reason,
            manual: data.manual,
            revision: data.revision,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the assigned worker.
    #[must_use]
    pub const fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    /// Returns the manufacturing-order reference.
    #[must_use]
    pub const fn order_ref(&self) -> &OrderRef {
        &self.order_ref
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn operation(&self) -> &OperationName {
        &self.operation
    }

    /// Returns the timer status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the hourly-rate snapshot captured at assignment time.
    #[must_use]
    pub const fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    /// Returns the persisted active-seconds accumulator.
    #[must_use]
    pub const fn active_seconds(&self) -> u64 {
        self.active_seconds
    }

    /// Returns the timestamp of the first transition into `Active`.
    #[must_use]
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Returns the accrual anchor: the timestamp of the latest transition.
    #[must_use]
    pub const fn last_action_time(&self) -> Option<DateTime<Utc>> {
        self.last_action_time
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns the note attached to the latest pause, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns whether this is a backfilled record.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.manual
    }

    /// Returns the optimistic-concurrency revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a timer action, accruing elapsed time where the transition
    /// table requires it.
    ///
    /// On success the accrual anchor is refreshed, the revision is bumped
    /// and the activity-trail event to record is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TimeclockDomainError::InvalidTransition`] when the action
    /// is not legal from the current status; the task is left unchanged.
    pub fn apply(
        &mut self,
        action: TaskAction,
        reason: Option<String>,
        clock: &impl Clock,
    ) -> Result<ActivityEvent, TimeclockDomainError> {
        if !self.status.permits(action) {
            return Err(TimeclockDomainError::InvalidTransition {
                action,
                from: self.status,
            });
        }

        let now = clock.utc();
        match action {
            TaskAction::Start => {
                // First start only; a later cascade must never move it.
                if self.start_time.is_none() {
                    self.start_time = Some(now);
                }
                self.status = TaskStatus::Active;
            }
            TaskAction::Resume | TaskAction::AutoResume => {
                self.status = TaskStatus::Active;
            }
            TaskAction::Pause => {
                self.accrue(now);
                self.status = TaskStatus::Paused;
                self.reason = reason;
            }
            TaskAction::AutoPause => {
                self.accrue(now);
                self.status = TaskStatus::Break;
                self.reason = Some(reason.unwrap_or_else(|| DEFAULT_BREAK_REASON.to_owned()));
            }
            TaskAction::Complete => {
                self.accrue(now);
                self.status = TaskStatus::Completed;
                self.end_time = Some(now);
                if reason.is_some() {
                    self.reason = reason;
                }
            }
        }

        self.last_action_time = Some(now);
        self.revision += 1;
        Ok(action.event())
    }

    /// Replaces the accumulator with an externally-audited value.
    ///
    /// Administrative edits re-anchor the timer so a running task does not
    /// re-accrue the interval the edit already accounted for.
    pub fn override_active_seconds(&mut self, seconds: u64, clock: &impl Clock) {
        self.active_seconds = seconds;
        self.last_action_time = Some(clock.utc());
        self.revision += 1;
    }

    /// Folds the interval since the anchor into the accumulator.
    ///
    /// Accrues only while `Active`; calling this from any other status is
    /// a no-op, which makes double-invocation harmless. A negative
    /// interval (clock skew) never un-accrues time.
    fn accrue(&mut self, now: DateTime<Utc>) {
        if self.status != TaskStatus::Active {
            return;
        }
        let Some(anchor) = self.last_action_time else {
            return;
        };
        let elapsed = (now - anchor).num_seconds().max(0);
        self.active_seconds += u64::try_from(elapsed).unwrap_or(0);
    }
}
