//! Roll-up summaries across sets of task records.

use super::cost::{round_money, task_cost};
use crate::timeclock::domain::{
    OperationName, OrderRef, Task, TaskFilter, TaskId, WorkerId, format_duration,
    projected_seconds,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

const SECONDS_PER_HOUR: u32 = 3600;

/// Per-task line in a labour report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCostLine {
    /// Task identifier.
    pub task_id: TaskId,
    /// Assigned worker.
    pub worker_id: WorkerId,
    /// Manufacturing-order reference.
    pub order_ref: OrderRef,
    /// Operation name.
    pub operation: OperationName,
    /// Seconds counted for this line.
    pub seconds: u64,
    /// Full-precision line cost; round at the display boundary.
    pub cost: Decimal,
}

/// Aggregated labour figures over a set of tasks.
///
/// Totals accumulate at full precision; [`merge`] keeps aggregation
/// associative so partial roll-ups combine into the same grand totals as
/// a flat fold.
///
/// [`merge`]: LaborSummary::merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaborSummary {
    total_seconds: u64,
    total_cost: Decimal,
    workers: BTreeSet<WorkerId>,
    lines: Vec<TaskCostLine>,
}

impl LaborSummary {
    /// Folds the tasks matching `filter` into a summary of settled
    /// (persisted) accrual.
    #[must_use]
    pub fn aggregate<'a>(tasks: impl IntoIterator<Item = &'a Task>, filter: &TaskFilter) -> Self {
        Self::fold(tasks, filter, None)
    }

    /// Like [`aggregate`], but projects running timers forward to `now`
    /// for a live "as of" estimate. Never used for persistence.
    ///
    /// [`aggregate`]: LaborSummary::aggregate
    #[must_use]
    pub fn aggregate_as_of<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        filter: &TaskFilter,
        now: DateTime<Utc>,
    ) -> Self {
        Self::fold(tasks, filter, Some(now))
    }

    fn fold<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        filter: &TaskFilter,
        as_of: Option<DateTime<Utc>>,
    ) -> Self {
        let mut summary = Self::default();
        for task in tasks.into_iter().filter(|task| filter.matches(task)) {
            let seconds =
                as_of.map_or_else(|| task.active_seconds(), |now| projected_seconds(task, now));
            let cost = task_cost(seconds, task.hourly_rate());

            summary.total_seconds += seconds;
            summary.total_cost += cost;
            summary.workers.insert(task.worker_id());
            summary.lines.push(TaskCostLine {
                task_id: task.id(),
                worker_id: task.worker_id(),
                order_ref: task.order_ref().clone(),
                operation: task.operation().clone(),
                seconds,
                cost,
            });
        }
        summary
    }

    /// Combines two summaries; aggregation is associative under `merge`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.total_seconds += other.total_seconds;
        self.total_cost += other.total_cost;
        self.workers.extend(other.workers);
        self.lines.extend(other.lines);
        self
    }

    /// Returns the summed seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Returns the full-precision summed cost.
    #[must_use]
    pub const fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Returns the summed cost rounded for display.
    #[must_use]
    pub fn total_cost_rounded(&self) -> Decimal {
        round_money(self.total_cost)
    }

    /// Renders the summed duration as `HH:MM:SS`.
    #[must_use]
    pub fn total_hours_formatted(&self) -> String {
        format_duration(self.total_seconds)
    }

    /// Returns the distinct workers involved.
    #[must_use]
    pub const fn distinct_workers(&self) -> &BTreeSet<WorkerId> {
        &self.workers
    }

    /// Returns the per-task breakdown.
    #[must_use]
    pub fn lines(&self) -> &[TaskCostLine] {
        &self.lines
    }

    /// Returns the blended average rate: total cost over total hours,
    /// zero when no time has accrued.
    #[must_use]
    pub fn blended_rate(&self) -> Decimal {
        if self.total_seconds == 0 {
            return Decimal::ZERO;
        }
        self.total_cost * Decimal::from(SECONDS_PER_HOUR) / Decimal::from(self.total_seconds)
    }
}

/// Rolls tasks up into one summary per manufacturing order.
#[must_use]
pub fn by_order<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<OrderRef, LaborSummary> {
    let mut groups: BTreeMap<OrderRef, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.order_ref().clone()).or_default().push(task);
    }
    groups
        .into_iter()
        .map(|(order, group)| (order, LaborSummary::aggregate(group, &TaskFilter::any())))
        .collect()
}

/// Rolls tasks up into one summary per worker.
#[must_use]
pub fn by_worker<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<WorkerId, LaborSummary> {
    let mut groups: BTreeMap<WorkerId, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.worker_id()).or_default().push(task);
    }
    groups
        .into_iter()
        .map(|(worker, group)| (worker, LaborSummary::aggregate(group, &TaskFilter::any())))
        .collect()
}
