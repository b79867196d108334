//! In-memory integration tests for todo and task commands.

use super::helpers::{TodoServices, services};
use chrono::Duration;
use eyre::ensure;
use rstest::rstest;
use todomate::{
    error::ErrorKind,
    member::domain::MemberId,
    todo::domain::{CompletionStatus, TodoChanges},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn todo_completes_and_reopens_with_its_tasks(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let owner = MemberId::new();
    let todo = services.create_report(owner).await?;
    let draft = services.tasks.add(owner, todo.id(), "draft").await?;
    let review = services.tasks.add(owner, todo.id(), "review").await?;

    services
        .tasks
        .set_status(owner, todo.id(), draft.id(), CompletionStatus::Complete)
        .await?;
    let done = services
        .tasks
        .set_status(owner, todo.id(), review.id(), CompletionStatus::Complete)
        .await?;
    ensure!(done.todo.is_complete(), "todo should complete with its last task");

    let edit = services
        .todos
        .update(owner, todo.id(), TodoChanges::new().with_title("Final report"))
        .await;
    ensure!(
        edit.map_err(|err| err.kind()) == Err(ErrorKind::State),
        "a complete todo should reject edits"
    );

    let reopened = services
        .tasks
        .set_status(owner, todo.id(), review.id(), CompletionStatus::Incomplete)
        .await?;
    ensure!(!reopened.todo.is_complete(), "todo should reopen with a task");

    let renamed = services
        .todos
        .update(owner, todo.id(), TodoChanges::new().with_title("Final report"))
        .await?;
    ensure!(renamed.title() == "Final report", "reopened todo is editable");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_view_lists_tasks_in_creation_order(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let owner = MemberId::new();
    let todo = services.create_report(owner).await?;
    let mut expected = Vec::new();
    for content in ["outline", "draft", "review"] {
        services.clock.advance(Duration::minutes(1));
        expected.push(services.tasks.add(owner, todo.id(), content).await?.id());
    }

    let detail = services.reads.todo_with_tasks(owner, todo.id()).await?;

    let listed: Vec<_> = detail.tasks.iter().map(|task| task.id()).collect();
    ensure!(listed == expected, "tasks should be in creation order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_freezes_todo_but_not_deletion(services: TodoServices) -> Result<(), eyre::Report> {
    let owner = MemberId::new();
    let todo = services.create_report(owner).await?;
    let draft = services.tasks.add(owner, todo.id(), "draft").await?;
    services.clock.advance(Duration::days(12));

    let late = services
        .tasks
        .set_status(owner, todo.id(), draft.id(), CompletionStatus::Complete)
        .await;
    ensure!(
        late.map(|_| ()).map_err(|err| err.kind()) == Err(ErrorKind::DeadlineExceeded),
        "frozen todo should reject task completion"
    );

    services.tasks.delete(owner, todo.id(), draft.id()).await?;
    services.todos.delete(owner, todo.id()).await?;

    let listed = services.reads.list_todos(owner, None).await?;
    ensure!(listed.is_empty(), "deleted todo should not be listed");
    Ok(())
}
