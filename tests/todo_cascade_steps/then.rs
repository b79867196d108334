//! Then steps for todo cascade BDD scenarios.

use super::world::{TodoCascadeWorld, run_async};
use rstest_bdd_macros::then;
use todomate::{
    error::ErrorKind,
    todo::domain::{CompletionStatus, Todo},
};

fn stored_todo(world: &TodoCascadeWorld) -> Result<Todo, eyre::Report> {
    let todo_id = world.todo()?.id();
    let detail = run_async(world.reads.todo_with_tasks(world.owner, todo_id))?;
    Ok(detail.todo)
}

fn expect_status(world: &TodoCascadeWorld, expected: CompletionStatus) -> Result<(), eyre::Report> {
    let todo = stored_todo(world)?;
    if todo.status() != expected {
        return Err(eyre::eyre!(
            "expected todo status {expected}, found {}",
            todo.status()
        ));
    }
    Ok(())
}

#[then("the todo is complete")]
fn todo_is_complete(world: &TodoCascadeWorld) -> Result<(), eyre::Report> {
    expect_status(world, CompletionStatus::Complete)
}

#[then("the todo is incomplete")]
fn todo_is_incomplete(world: &TodoCascadeWorld) -> Result<(), eyre::Report> {
    expect_status(world, CompletionStatus::Incomplete)
}

#[then("the todo has a completion time")]
fn todo_has_completion_time(world: &TodoCascadeWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        stored_todo(world)?.completed_at().is_some(),
        "expected completed_at to be set"
    );
    Ok(())
}

#[then("the todo has no completion time")]
fn todo_has_no_completion_time(world: &TodoCascadeWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        stored_todo(world)?.completed_at().is_none(),
        "expected completed_at to be cleared"
    );
    Ok(())
}

#[then("the command fails with a deadline exceeded error")]
fn command_fails_with_deadline_exceeded(world: &TodoCascadeWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::DeadlineExceeded => Ok(()),
        other => Err(eyre::eyre!("expected a deadline exceeded error, got {other:?}")),
    }
}
