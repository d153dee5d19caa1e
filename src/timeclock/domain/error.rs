//! Error types for timeclock domain validation and transitions.

use super::task::{TaskAction, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeclockDomainError {
    /// The requested action is not legal from the task's current status.
    ///
    /// No mutation is performed; the caller should re-fetch current state
    /// before deciding whether to retry or surface the conflict.
    #[error("cannot {action} a task in status '{from}'")]
    InvalidTransition {
        /// The action that was requested.
        action: TaskAction,
        /// The status the task was in at the time of the call.
        from: TaskStatus,
    },

    /// The order reference is empty after trimming.
    #[error("order reference must not be empty")]
    EmptyOrderRef,

    /// The operation name is empty after trimming.
    #[error("operation name must not be empty")]
    EmptyOperationName,

    /// The hourly rate is negative.
    #[error("hourly rate must not be negative: {0}")]
    NegativeHourlyRate(rust_decimal::Decimal),

    /// A manual entry's end time precedes its start time.
    #[error("manual entry ends before it starts")]
    ManualEntryEndsBeforeStart,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing worker availability from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown worker availability: {0}")]
pub struct ParseAvailabilityError(pub String);
