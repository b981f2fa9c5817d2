//! When steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("overdue tasks are reconciled")]
fn overdue_tasks_are_reconciled(world: &mut TaskStatusWorld) -> Result<(), eyre::Report> {
    let service = world.service()?;
    run_async(service.reconcile_missed()).wrap_err("reconcile overdue tasks")?;
    Ok(())
}

#[when(r#"task "{title}" is unchecked"#)]
fn task_is_unchecked(world: &mut TaskStatusWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let service = world.service()?;
    run_async(service.toggle_done(id, false)).wrap_err("uncheck task")?;
    Ok(())
}

#[when(r#"task "{title}" is set to "{status}""#)]
fn task_is_set_to(
    world: &mut TaskStatusWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let service = world.service()?;
    world.last_status_error = run_async(service.set_status(id, &status)).err();
    Ok(())
}
