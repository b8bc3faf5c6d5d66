//! When steps for task command BDD scenarios.

use super::world::{TaskCommandWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::{Actor, TaskDraft};

#[when(r#""{actor}" creates a task titled "{title}""#)]
fn create_task(world: &mut TaskCommandWorld, actor: String, title: String) {
    match run_async(
        world
            .service
            .create(TaskDraft::new(title), &Actor::user(actor)),
    ) {
        Ok(task) => world.last_task = Some(task),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#""{actor}" updates the task to status "{status}""#)]
fn update_task(
    world: &mut TaskCommandWorld,
    actor: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let id = task
        .id()
        .ok_or_else(|| eyre::eyre!("scenario task has no id"))?;
    let draft = TaskDraft::from(task).with_status(status);

    match run_async(world.service.update(id, draft, &Actor::user(actor))) {
        Ok(Some(updated)) => world.last_task = Some(updated),
        Ok(None) => return Err(eyre::eyre!("scenario task disappeared")),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#""{actor}" deletes the task"#)]
fn user_deletes_task(world: &mut TaskCommandWorld, actor: String) -> Result<(), eyre::Report> {
    delete_as(world, &Actor::user(actor))
}

#[when(r#"administrator "{actor}" deletes the task"#)]
fn admin_deletes_task(world: &mut TaskCommandWorld, actor: String) -> Result<(), eyre::Report> {
    delete_as(world, &Actor::admin(actor))
}

fn delete_as(world: &mut TaskCommandWorld, actor: &Actor) -> Result<(), eyre::Report> {
    let id = world
        .current_task()?
        .id()
        .ok_or_else(|| eyre::eyre!("scenario task has no id"))?;
    if let Err(err) = run_async(world.service.delete(id, actor)) {
        world.last_error = Some(err);
    }
    Ok(())
}
