//! Given steps for break cascade BDD scenarios.

use super::scenario_world::{CascadeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use rust_decimal::Decimal;
use taylor::timeclock::{
    domain::{Availability, TaskAction, WorkerId, WorkerSnapshot},
    services::AssignTaskRequest,
};

#[given(r#"a worker "{name}" with an hourly rate of {rate:i64} dollars"#)]
fn clocked_in_worker(
    world: &mut CascadeWorld,
    name: String,
    rate: i64,
) -> Result<(), eyre::Report> {
    let worker_id = WorkerId::new();
    world
        .directory
        .insert(
            worker_id,
            WorkerSnapshot::new(name.clone(), Decimal::from(rate), Availability::Available),
        )
        .wrap_err("register worker in scenario setup")?;
    world.workers.insert(name, worker_id);
    Ok(())
}

#[given(r#""{name}" is working on "{operation}" for order "{order}""#)]
fn worker_is_working_on(
    world: &mut CascadeWorld,
    name: String,
    operation: String,
    order: String,
) -> Result<(), eyre::Report> {
    let worker_id = world.worker(&name)?;
    let task = run_async(world.timer.assign_task(AssignTaskRequest::new(
        worker_id,
        order,
        operation.clone(),
    )))
    .wrap_err("assign task in scenario setup")?;
    run_async(
        world
            .timer
            .perform_action(task.id(), TaskAction::Start, None),
    )
    .wrap_err("start task in scenario setup")?;
    world.tasks.insert(operation, task.id());
    Ok(())
}

#[given(r#""{name}" has paused "{operation}" with reason "{reason}""#)]
fn worker_has_paused(
    world: &mut CascadeWorld,
    name: String,
    operation: String,
    reason: String,
) -> Result<(), eyre::Report> {
    world.worker(&name)?;
    let task_id = world
        .tasks
        .get(&operation)
        .copied()
        .ok_or_else(|| eyre::eyre!("unknown task in scenario: {operation}"))?;
    run_async(
        world
            .timer
            .perform_action(task_id, TaskAction::Pause, Some(reason)),
    )
    .wrap_err("pause task in scenario setup")?;
    Ok(())
}
