//! Then steps for task command BDD scenarios.

use super::world::{TaskCommandWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::{PermissionError, TaskPriority, TaskStatus, TaskValidationError},
    ports::TaskRepository,
    services::TaskCommandError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskCommandWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.current_task()?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task priority is "{priority}""#)]
fn task_priority_is(world: &TaskCommandWorld, priority: String) -> Result<(), eyre::Report> {
    let expected = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid expected priority in scenario: {err}"))?;
    let task = world.current_task()?;
    eyre::ensure!(
        task.priority() == expected,
        "expected priority {expected}, found {}",
        task.priority()
    );
    Ok(())
}

#[then(r#"the task owner is "{owner}""#)]
fn task_owner_is(world: &TaskCommandWorld, owner: String) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(
        task.owner() == owner,
        "expected owner {owner}, found {}",
        task.owner()
    );
    eyre::ensure!(
        world.events.events().len() == 1,
        "creation should publish exactly one event"
    );
    Ok(())
}

#[then("the command fails with a permission error")]
fn fails_with_permission_error(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the command to fail"))?;
    if !matches!(
        err,
        TaskCommandError::Permission(
            PermissionError::NotOwner { .. } | PermissionError::AdminOnly { .. }
        )
    ) {
        return Err(eyre::eyre!("expected permission error, got {err:?}"));
    }
    Ok(())
}

#[then("the command fails with an invalid status transition error")]
fn fails_with_invalid_transition(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the command to fail"))?;
    if !matches!(
        err,
        TaskCommandError::Validation(TaskValidationError::InvalidStatusTransition { .. })
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {err:?}"
        ));
    }
    Ok(())
}

#[then("the task still exists")]
fn task_still_exists(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(lookup(world)?.is_some(), "task should still exist");
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(lookup(world)?.is_none(), "task should be deleted");
    Ok(())
}

fn lookup(
    world: &TaskCommandWorld,
) -> Result<Option<taskboard::task::domain::Task>, eyre::Report> {
    let id = world
        .current_task()?
        .id()
        .ok_or_else(|| eyre::eyre!("scenario task has no id"))?;
    Ok(run_async(world.repository.find_by_id(id))?)
}
