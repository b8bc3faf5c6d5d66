//! Given steps for task command BDD scenarios.

use super::world::{TaskCommandWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::domain::{Actor, TaskDraft};

#[given(r#""{actor}" has created a task titled "{title}""#)]
fn task_created(
    world: &mut TaskCommandWorld,
    actor: String,
    title: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(TaskDraft::new(title), &Actor::user(actor)),
    )
    .wrap_err("create task in scenario setup")?;
    world.last_task = Some(created);
    Ok(())
}

#[given(r#""{actor}" has moved the task to "{status}""#)]
fn task_moved(
    world: &mut TaskCommandWorld,
    actor: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let id = task
        .id()
        .ok_or_else(|| eyre::eyre!("scenario task has no id"))?;
    let draft = TaskDraft::from(task).with_status(status);
    let moved = run_async(world.service.update(id, draft, &Actor::user(actor)))
        .wrap_err("move task in scenario setup")?
        .ok_or_else(|| eyre::eyre!("scenario task disappeared"))?;
    world.last_task = Some(moved);
    Ok(())
}
