//! When steps for todo cascade BDD scenarios.

use super::world::{TodoCascadeWorld, run_async};
use rstest_bdd_macros::when;
use todomate::todo::domain::CompletionStatus;

fn set_task_status(
    world: &mut TodoCascadeWorld,
    content: &str,
    target: CompletionStatus,
) -> Result<(), eyre::Report> {
    let todo_id = world.todo()?.id();
    let task_id = world.task_id(content)?;
    let result = run_async(world.tasks.set_status(world.owner, todo_id, task_id, target));
    match result {
        Ok(change) => {
            world.todo = Some(change.todo);
            world.last_result = Some(Ok(()));
        }
        Err(err) => world.last_result = Some(Err(err)),
    }
    Ok(())
}

#[when(r#"the task "{content}" is completed"#)]
fn task_completed(world: &mut TodoCascadeWorld, content: String) -> Result<(), eyre::Report> {
    set_task_status(world, &content, CompletionStatus::Complete)
}

#[when(r#"the task "{content}" is reopened"#)]
fn task_reopened(world: &mut TodoCascadeWorld, content: String) -> Result<(), eyre::Report> {
    set_task_status(world, &content, CompletionStatus::Incomplete)
}

#[when(r#"the task "{content}" is deleted"#)]
fn task_deleted(world: &mut TodoCascadeWorld, content: String) -> Result<(), eyre::Report> {
    let todo_id = world.todo()?.id();
    let task_id = world.task_id(&content)?;
    let result = run_async(world.tasks.delete(world.owner, todo_id, task_id));
    match result {
        Ok(parent) => {
            world.todo = Some(parent);
            world.task_ids.remove(&content);
            world.last_result = Some(Ok(()));
        }
        Err(err) => world.last_result = Some(Err(err)),
    }
    Ok(())
}
