//! Then steps for break cascade BDD scenarios.

use super::scenario_world::{CascadeWorld, run_async};
use rstest_bdd_macros::then;
use taylor::reporting::{LaborSummary, format_money};
use taylor::timeclock::domain::{OrderRef, TaskFilter, TaskStatus};

fn assert_task_status(
    world: &CascadeWorld,
    operation: &str,
    expected: TaskStatus,
) -> Result<(), eyre::Report> {
    let task = world.stored_task(operation)?;
    eyre::ensure!(
        task.status() == expected,
        "expected {operation} to be {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task "{operation}" is on break"#)]
fn task_is_on_break(world: &CascadeWorld, operation: String) -> Result<(), eyre::Report> {
    assert_task_status(world, &operation, TaskStatus::Break)
}

#[then(r#"the task "{operation}" is active"#)]
fn task_is_active(world: &CascadeWorld, operation: String) -> Result<(), eyre::Report> {
    assert_task_status(world, &operation, TaskStatus::Active)
}

#[then(r#"the task "{operation}" is completed"#)]
fn task_is_completed(world: &CascadeWorld, operation: String) -> Result<(), eyre::Report> {
    assert_task_status(world, &operation, TaskStatus::Completed)
}

#[then(r#"the task "{operation}" is paused with reason "{reason}""#)]
fn task_is_paused_with_reason(
    world: &CascadeWorld,
    operation: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world.stored_task(&operation)?;
    eyre::ensure!(
        task.status() == TaskStatus::Paused,
        "expected {operation} to be paused, found {}",
        task.status()
    );
    eyre::ensure!(
        task.reason() == Some(reason.as_str()),
        "expected reason {reason:?}, found {:?}",
        task.reason()
    );
    Ok(())
}

#[then(r#"the task "{operation}" has accrued {seconds:u64} seconds"#)]
fn task_has_accrued(
    world: &CascadeWorld,
    operation: String,
    seconds: u64,
) -> Result<(), eyre::Report> {
    let task = world.stored_task(&operation)?;
    eyre::ensure!(
        task.active_seconds() == seconds,
        "expected {seconds}s accrued on {operation}, found {}",
        task.active_seconds()
    );
    Ok(())
}

#[then(r#"the labour cost for order "{order}" is "{amount}""#)]
fn labour_cost_for_order(
    world: &CascadeWorld,
    order: String,
    amount: String,
) -> Result<(), eyre::Report> {
    use taylor::timeclock::ports::TaskRepository;

    let order_ref = OrderRef::new(order).map_err(|err| eyre::eyre!("invalid order: {err}"))?;
    let filter = TaskFilter::any().with_order(order_ref);
    let tasks = run_async(world.repository.list(&filter))?;
    let summary = LaborSummary::aggregate(&tasks, &TaskFilter::any());

    let formatted = format_money(summary.total_cost());
    eyre::ensure!(
        formatted == amount,
        "expected order cost {amount}, found {formatted}"
    );
    Ok(())
}
