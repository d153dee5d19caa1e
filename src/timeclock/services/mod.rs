//! Application services for timer orchestration and the break cascade.

mod cascade;
mod timer;

pub use cascade::{BreakCascadeService, CascadeFailure, CascadeReport, SHIFT_END_REASON};
pub use timer::{AssignTaskRequest, TaskTimerError, TaskTimerResult, TaskTimerService};
