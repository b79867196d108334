//! Behaviour tests for the todo completion cascade.

mod test_helpers;

#[path = "todo_cascade_steps/mod.rs"]
mod todo_cascade_steps_defs;

use rstest_bdd_macros::scenario;
use todo_cascade_steps_defs::world::{TodoCascadeWorld, world};

#[scenario(
    path = "tests/features/todo_cascade.feature",
    name = "Completing every task completes the todo"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completing_every_task_completes_todo(world: TodoCascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/todo_cascade.feature",
    name = "Reopening a task reopens a completed todo"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reopening_task_reopens_todo(world: TodoCascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/todo_cascade.feature",
    name = "Deleting the last completed task reverts the todo"
)]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_last_task_reverts_todo(world: TodoCascadeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/todo_cascade.feature",
    name = "A todo past its deadline rejects task completion"
)]
#[tokio::test(flavor = "multi_thread")]
async fn frozen_todo_rejects_task_completion(world: TodoCascadeWorld) {
    let _ = world;
}
