//! BDD scenarios for the break cascade over a worker's tasks.

#[path = "world.rs"]
mod scenario_world;

mod given;
mod then;
mod when;

use rstest_bdd_macros::scenario;
use scenario_world::{CascadeWorld, world};

#[scenario(
    path = "tests/features/break_cascade.feature",
    name = "Going on break pauses every running task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn break_pauses_running_tasks(world: CascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/break_cascade.feature",
    name = "Returning from break resumes only auto-paused tasks"
)]
#[tokio::test(flavor = "multi_thread")]
async fn return_resumes_only_auto_paused(world: CascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/break_cascade.feature",
    name = "Break time accrues no cost"
)]
#[tokio::test(flavor = "multi_thread")]
async fn break_time_accrues_no_cost(world: CascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/break_cascade.feature",
    name = "Ending a shift completes open tasks"
)]
#[tokio::test(flavor = "multi_thread")]
async fn shift_end_completes_open_tasks(world: CascadeWorld) {
    let _ = world;
}
