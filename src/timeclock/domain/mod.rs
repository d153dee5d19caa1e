//! Domain model for task time tracking.
//!
//! The timeclock domain models the task timer state machine, the accrual
//! of active seconds at each transition, and the activity-trail
//! vocabulary, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod accrual;
mod activity;
mod error;
mod filter;
mod ids;
mod task;
mod worker;

pub use accrual::{format_duration, projected_seconds};
pub use activity::{ActivityEvent, ActivityRecord, ParseActivityEventError};
pub use error::{ParseAvailabilityError, ParseTaskStatusError, TimeclockDomainError};
pub use filter::TaskFilter;
pub use ids::{OperationName, OrderRef, TaskId, WorkerId};
pub use task::{
    DEFAULT_BREAK_REASON, ManualEntry, PersistedTaskData, Task, TaskAction, TaskStatus,
};
pub use worker::{Availability, WorkerSnapshot};
