//! When steps for break cascade BDD scenarios.

use super::scenario_world::{CascadeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("{minutes:i64} minutes pass")]
fn minutes_pass(world: &mut CascadeWorld, minutes: i64) {
    world.clock.advance_minutes(minutes);
}

#[when(r#""{name}" goes on break"#)]
fn worker_goes_on_break(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let worker_id = world.worker(&name)?;
    let report = run_async(world.cascade.pause_all_active(worker_id, None))
        .wrap_err("pause cascade in scenario")?;
    eyre::ensure!(
        report.is_complete(),
        "pause cascade left failures: {:?}",
        report.failures()
    );
    Ok(())
}

#[when(r#""{name}" returns from break"#)]
fn worker_returns_from_break(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let worker_id = world.worker(&name)?;
    let report = run_async(world.cascade.resume_all_auto_paused(worker_id))
        .wrap_err("resume cascade in scenario")?;
    eyre::ensure!(
        report.is_complete(),
        "resume cascade left failures: {:?}",
        report.failures()
    );
    Ok(())
}

#[when(r#""{name}" ends their shift"#)]
fn worker_ends_shift(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let worker_id = world.worker(&name)?;
    let report =
        run_async(world.cascade.complete_all(worker_id)).wrap_err("shift-end cascade in scenario")?;
    eyre::ensure!(
        report.is_complete(),
        "shift-end cascade left failures: {:?}",
        report.failures()
    );
    Ok(())
}
