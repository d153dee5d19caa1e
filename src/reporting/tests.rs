//! Unit tests for labour cost aggregation and rounding policy.

use super::{LaborSummary, by_order, by_worker, format_money, round_money, task_cost};
use crate::timeclock::domain::{
    OperationName, OrderRef, PersistedTaskData, Task, TaskFilter, TaskId, TaskStatus, WorkerId,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;
use rust_decimal::Decimal;

fn report_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 16, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn settled_task(
    worker_id: WorkerId,
    order_ref: &str,
    operation: &str,
    seconds: u64,
    rate_dollars: i64,
) -> Task {
    let end = report_instant();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        worker_id,
        order_ref: OrderRef::new(order_ref).expect("order ref"),
        operation: OperationName::new(operation).expect("operation"),
        status: TaskStatus::Completed,
        hourly_rate: Decimal::from(rate_dollars),
        active_seconds: seconds,
        start_time: Some(end - Duration::seconds(i64::try_from(seconds).expect("fits"))),
        last_action_time: Some(end),
        end_time: Some(end),
        reason: None,
        manual: false,
        revision: 2,
        created_at: end - Duration::hours(8),
    })
}

fn running_task(worker_id: WorkerId, seconds: u64, rate_dollars: i64, anchor: DateTime<Utc>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        worker_id,
        order_ref: OrderRef::new("MO-2025-0042").expect("order ref"),
        operation: OperationName::new("Packing").expect("operation"),
        status: TaskStatus::Active,
        hourly_rate: Decimal::from(rate_dollars),
        active_seconds: seconds,
        start_time: Some(anchor - Duration::hours(1)),
        last_action_time: Some(anchor),
        end_time: None,
        reason: None,
        manual: false,
        revision: 3,
        created_at: anchor - Duration::hours(2),
    })
}

#[rstest]
#[case(1800, 20, "10.00")]
#[case(3600, 20, "20.00")]
#[case(0, 20, "0.00")]
#[case(5400, 15, "22.50")]
fn task_cost_is_seconds_over_an_hour_times_rate(
    #[case] seconds: u64,
    #[case] rate: i64,
    #[case] expected: &str,
) {
    assert_eq!(format_money(task_cost(seconds, Decimal::from(rate))), expected);
}

#[rstest]
#[case(Decimal::new(2_005, 3), Decimal::new(201, 2))]
#[case(Decimal::new(-2_005, 3), Decimal::new(-201, 2))]
#[case(Decimal::new(2_004_9, 4), Decimal::new(200, 2))]
#[case(Decimal::from(10), Decimal::from(10))]
fn money_rounds_midpoint_away_from_zero(#[case] amount: Decimal, #[case] expected: Decimal) {
    assert_eq!(round_money(amount), expected);
}

#[test]
fn totals_round_once_at_the_boundary_not_per_line() {
    let worker = WorkerId::new();
    // Each line is 10 * 1000 / 3600 dollars: a repeating decimal.
    let tasks: Vec<Task> = (0..3)
        .map(|_| settled_task(worker, "MO-2025-0042", "Packing", 1000, 10))
        .collect();

    let summary = LaborSummary::aggregate(&tasks, &TaskFilter::any());

    assert_eq!(summary.total_cost_rounded(), Decimal::new(833, 2));

    // Rounding each line first would drift a cent upward.
    let per_line_rounded: Decimal = summary
        .lines()
        .iter()
        .map(|line| round_money(line.cost))
        .sum();
    assert_eq!(per_line_rounded, Decimal::new(834, 2));
    assert_ne!(summary.total_cost_rounded(), per_line_rounded);
}

#[test]
fn merge_is_associative_and_matches_the_flat_fold() {
    let alice = WorkerId::new();
    let bob = WorkerId::new();
    let tasks = [
        settled_task(alice, "MO-2025-0042", "Packing", 1800, 20),
        settled_task(alice, "MO-2025-0042", "Welding", 1000, 10),
        settled_task(bob, "MO-2025-0043", "Deburring", 5400, 15),
        settled_task(bob, "MO-2025-0043", "Inspection", 777, 23),
    ];
    let filter = TaskFilter::any();

    let parts: Vec<LaborSummary> = tasks
        .iter()
        .map(|task| LaborSummary::aggregate([task], &filter))
        .collect();
    let [a, b, c, d] = parts.try_into().expect("four parts");

    let left = a.clone().merge(b.clone()).merge(c.clone()).merge(d.clone());
    let right = a.merge(b.merge(c.merge(d)));
    let flat = LaborSummary::aggregate(&tasks, &filter);

    assert_eq!(left, right);
    assert_eq!(left.total_seconds(), flat.total_seconds());
    assert_eq!(left.total_cost(), flat.total_cost());
    assert_eq!(left.distinct_workers(), flat.distinct_workers());
}

#[test]
fn roll_ups_sum_to_the_flat_grand_total() {
    let alice = WorkerId::new();
    let bob = WorkerId::new();
    let tasks = [
        settled_task(alice, "MO-2025-0042", "Packing", 1800, 20),
        settled_task(bob, "MO-2025-0042", "Welding", 3600, 25),
        settled_task(alice, "MO-2025-0043", "Deburring", 900, 20),
        settled_task(bob, "MO-2025-0044", "Inspection", 450, 25),
    ];
    let flat = LaborSummary::aggregate(&tasks, &TaskFilter::any());

    let orders = by_order(&tasks);
    assert_eq!(orders.len(), 3);
    let order_total: Decimal = orders.values().map(LaborSummary::total_cost).sum();
    let order_seconds: u64 = orders.values().map(LaborSummary::total_seconds).sum();
    assert_eq!(order_total, flat.total_cost());
    assert_eq!(order_seconds, flat.total_seconds());

    let workers = by_worker(&tasks);
    assert_eq!(workers.len(), 2);
    let worker_total: Decimal = workers.values().map(LaborSummary::total_cost).sum();
    assert_eq!(worker_total, flat.total_cost());
    assert_eq!(
        workers
            .get(&alice)
            .map(LaborSummary::total_seconds),
        Some(2700)
    );
}

#[test]
fn filters_scope_the_aggregate() {
    let alice = WorkerId::new();
    let bob = WorkerId::new();
    let tasks = [
        settled_task(alice, "MO-2025-0042", "Packing", 1800, 20),
        settled_task(bob, "MO-2025-0042", "Welding", 3600, 25),
    ];

    let summary = LaborSummary::aggregate(&tasks, &TaskFilter::for_worker(alice));

    assert_eq!(summary.total_seconds(), 1800);
    assert_eq!(summary.lines().len(), 1);
    assert_eq!(summary.distinct_workers().len(), 1);
    assert_eq!(format_money(summary.total_cost()), "10.00");
}

#[test]
fn blended_rate_weights_by_time_worked() {
    let tasks = [
        settled_task(WorkerId::new(), "MO-2025-0042", "Packing", 3600, 15),
        settled_task(WorkerId::new(), "MO-2025-0042", "Welding", 3600, 25),
    ];

    let summary = LaborSummary::aggregate(&tasks, &TaskFilter::any());

    assert_eq!(summary.blended_rate(), Decimal::from(20));
}

#[test]
fn blended_rate_is_zero_when_no_time_accrued() {
    let summary = LaborSummary::default();
    assert_eq!(summary.blended_rate(), Decimal::ZERO);
    assert_eq!(summary.total_cost_rounded(), Decimal::ZERO);
}

#[test]
fn live_aggregate_projects_running_timers_forward() {
    let anchor = report_instant();
    let task = running_task(WorkerId::new(), 1800, 20, anchor);

    let settled = LaborSummary::aggregate([&task], &TaskFilter::any());
    assert_eq!(settled.total_seconds(), 1800);

    let live = LaborSummary::aggregate_as_of(
        [&task],
        &TaskFilter::any(),
        anchor + Duration::seconds(600),
    );
    assert_eq!(live.total_seconds(), 2400);
    assert_eq!(format_money(live.total_cost()), "13.33");
}

#[test]
fn summary_formats_duration_for_display() {
    let task = settled_task(WorkerId::new(), "MO-2025-0042", "Packing", 5400, 20);
    let summary = LaborSummary::aggregate([&task], &TaskFilter::any());

    assert_eq!(summary.total_hours_formatted(), "01:30:00");
}
