//! Labour cost aggregation over persisted task records.
//!
//! The aggregator is read-only: it folds hourly-rate snapshots and
//! active-seconds accumulators into monetary cost at per-task and
//! roll-up granularity. Intermediate sums carry full decimal precision;
//! money is rounded to two decimals exactly once, at the display
//! boundary, so per-line and total figures never drift apart.

mod cost;
mod summary;

pub use cost::{format_money, round_money, task_cost};
pub use summary::{LaborSummary, TaskCostLine, by_order, by_worker};

#[cfg(test)]
mod tests;
