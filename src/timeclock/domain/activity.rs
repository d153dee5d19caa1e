//! Activity-trail vocabulary for the shop-floor audit log.

use super::{TaskId, WorkerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Event types recorded in the activity trail.
///
/// Clock and break events are recorded by the shift layer and the break
/// cascade; task events are emitted by the timer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEvent {
    /// Worker clocked in for a shift.
    ///
    /// Written solely by the external shift layer; the engine reads the
    /// vocabulary but never emits this event itself.
    ClockIn,
    /// Worker clocked out.
    ClockOut,
    /// Worker went on break.
    BreakStart,
    /// Worker returned from break.
    BreakEnd,
    /// A task timer started.
    TaskStart,
    /// A task timer paused (manually or by the break cascade).
    TaskPause,
    /// A task timer resumed.
    TaskResume,
    /// A task was completed.
    TaskComplete,
}

impl ActivityEvent {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClockIn => "clock_in",
            Self::ClockOut => "clock_out",
            Self::BreakStart => "break_start",
            Self::BreakEnd => "break_end",
            Self::TaskStart => "task_start",
            Self::TaskPause => "task_pause",
            Self::TaskResume => "task_resume",
            Self::TaskComplete => "task_complete",
        }
    }
}

impl fmt::Display for ActivityEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityEvent {
    type Error = ParseActivityEventError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "clock_in" => Ok(Self::ClockIn),
            "clock_out" => Ok(Self::ClockOut),
            "break_start" => Ok(Self::BreakStart),
            "break_end" => Ok(Self::BreakEnd),
            "task_start" => Ok(Self::TaskStart),
            "task_pause" => Ok(Self::TaskPause),
            "task_resume" => Ok(Self::TaskResume),
            "task_complete" => Ok(Self::TaskComplete),
            _ => Err(ParseActivityEventError(value.to_owned())),
        }
    }
}

/// Error returned while parsing activity events from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity event: {0}")]
pub struct ParseActivityEventError(pub String);

/// One record in the activity trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Worker the event is attributed to.
    pub worker_id: WorkerId,
    /// Event type.
    pub event: ActivityEvent,
    /// Human-readable description (the operation name for task events).
    pub description: String,
    /// Optional detail, typically the pause reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Task the event relates to, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// When the event occurred.
    pub recorded_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a record with no detail or task linkage.
    #[must_use]
    pub fn new(
        worker_id: WorkerId,
        event: ActivityEvent,
        description: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            worker_id,
            event,
            description: description.into(),
            details: None,
            task_id: None,
            recorded_at,
        }
    }

    /// Attaches a free-text detail (e.g. a pause reason).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Links the record to a task.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}
