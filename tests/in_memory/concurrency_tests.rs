//! Racing task completions under one todo.

use super::helpers::{TodoServices, services};
use eyre::ensure;
use rstest::rstest;
use std::sync::Arc;
use todomate::{member::domain::MemberId, todo::domain::CompletionStatus};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_completions_both_land_and_complete_todo(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let owner = MemberId::new();
    let todo = services.create_report(owner).await?;
    let first = services.tasks.add(owner, todo.id(), "draft").await?;
    let second = services.tasks.add(owner, todo.id(), "review").await?;

    let shared = Arc::new(services);
    let mut handles = Vec::new();
    for task_id in [first.id(), second.id()] {
        let racing = Arc::clone(&shared);
        let todo_id = todo.id();
        handles.push(tokio::spawn(async move {
            racing
                .tasks
                .set_status(owner, todo_id, task_id, CompletionStatus::Complete)
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let detail = shared.reads.todo_with_tasks(owner, todo.id()).await?;
    ensure!(
        detail.tasks.iter().all(|task| task.is_complete()),
        "both completions should be stored"
    );
    ensure!(detail.todo.is_complete(), "todo should end up complete");
    Ok(())
}
