//! Given steps for todo cascade BDD scenarios.

use super::world::{TodoCascadeWorld, run_async};
use chrono::{Duration, NaiveDate};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todomate::todo::{domain::CompletionStatus, services::CreateTodoRequest};

#[given(r#"a todo "{title}" due on "{due}""#)]
fn todo_due_on(world: &mut TodoCascadeWorld, title: String, due: String) -> Result<(), eyre::Report> {
    let date: NaiveDate = due.parse().wrap_err("parse due date")?;
    let created = run_async(
        world
            .todos
            .create(world.owner, CreateTodoRequest::new(title).due_on(date)),
    )
    .wrap_err("create todo for cascade scenario")?;
    world.todo = Some(created);
    Ok(())
}

#[given(r#"the todo has a task "{content}""#)]
fn todo_has_task(world: &mut TodoCascadeWorld, content: String) -> Result<(), eyre::Report> {
    let todo_id = world.todo()?.id();
    let task = run_async(world.tasks.add(world.owner, todo_id, content.clone()))
        .wrap_err("add task for cascade scenario")?;
    world.task_ids.insert(content, task.id());
    Ok(())
}

#[given("every task has been completed")]
fn every_task_completed(world: &mut TodoCascadeWorld) -> Result<(), eyre::Report> {
    let todo_id = world.todo()?.id();
    let task_ids: Vec<_> = world.task_ids.values().copied().collect();
    for task_id in task_ids {
        let change = run_async(world.tasks.set_status(
            world.owner,
            todo_id,
            task_id,
            CompletionStatus::Complete,
        ))
        .wrap_err("complete task in scenario setup")?;
        world.todo = Some(change.todo);
    }
    Ok(())
}

#[given("the deadline has passed")]
fn deadline_has_passed(world: &mut TodoCascadeWorld) {
    world.clock.advance(Duration::days(30));
}
