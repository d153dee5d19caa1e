//! Pure time-accrual projections.
//!
//! These functions are the single source of truth for any "live" duration
//! shown to a caller. They never mutate stored state; only the state
//! machine transitions in [`super::Task::apply`] persist accrual.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Projects the task's total active seconds as of `now`.
///
/// While the task is [`TaskStatus::Active`] the persisted accumulator is
/// extended by the interval since the accrual anchor; in every other
/// status the accumulator is returned unchanged. The projection is
/// monotone in `now` for a fixed task snapshot.
#[must_use]
pub fn projected_seconds(task: &Task, now: DateTime<Utc>) -> u64 {
    let live = match (task.status(), task.last_action_time()) {
        (TaskStatus::Active, Some(anchor)) => {
            u64::try_from((now - anchor).num_seconds().max(0)).unwrap_or(0)
        }
        _ => 0,
    };
    task.active_seconds() + live
}

/// Renders a second count as zero-padded `HH:MM:SS`.
///
/// Hours are unbounded; a task spanning days renders as e.g. `52:10:09`.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "sexagesimal split of a second count is exact"
)]
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
