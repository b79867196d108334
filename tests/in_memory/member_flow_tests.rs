//! In-memory integration tests linking members to the todos they own.

use std::sync::Arc;

use super::helpers::{TodoServices, services};
use crate::test_helpers::ManualClock;
use eyre::ensure;
use rstest::rstest;
use todomate::{
    error::ErrorKind,
    member::{
        adapters::{Sha256PasswordHasher, memory::InMemoryMemberRepository},
        services::{LoginRequest, MemberService, RegisterMemberRequest},
    },
};

type TestMemberService =
    MemberService<InMemoryMemberRepository, Sha256PasswordHasher, ManualClock>;

fn member_service() -> TestMemberService {
    MemberService::new(
        Arc::new(InMemoryMemberRepository::new()),
        Arc::new(Sha256PasswordHasher::new()),
        Arc::new(ManualClock::scenario_start()),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logged_in_member_owns_only_their_todos(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let members = member_service();
    members
        .register(RegisterMemberRequest::new("Alice", "alice", "s3cret", "alice@example.com"))
        .await?;
    members
        .register(RegisterMemberRequest::new("Bob", "bob", "hunter2", "bob@example.com"))
        .await?;

    let alice = members.login(LoginRequest::new("alice", "s3cret")).await?;
    let bob = members.login(LoginRequest::new("bob", "hunter2")).await?;

    let todo = services.create_report(alice.id).await?;

    let alice_view = services.reads.list_todos(alice.id, None).await?;
    ensure!(alice_view.len() == 1, "alice should see her todo");
    let bob_view = services.reads.list_todos(bob.id, None).await?;
    ensure!(bob_view.is_empty(), "bob should not see alice's todo");

    let intrusion = services.tasks.add(bob.id, todo.id(), "sneaky").await;
    ensure!(
        intrusion.map(|_| ()).map_err(|err| err.kind()) == Err(ErrorKind::Authorization),
        "bob should not add tasks to alice's todo"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_and_unknown_login_fail_alike() -> Result<(), eyre::Report> {
    let members = member_service();
    members
        .register(RegisterMemberRequest::new("Alice", "alice", "s3cret", "alice@example.com"))
        .await?;

    let wrong_password = members.login(LoginRequest::new("alice", "guess")).await;
    let unknown = members.login(LoginRequest::new("mallory", "s3cret")).await;

    let wrong_password_err = wrong_password
        .err()
        .ok_or_else(|| eyre::eyre!("wrong password should fail"))?;
    let unknown_err = unknown
        .err()
        .ok_or_else(|| eyre::eyre!("unknown login should fail"))?;
    ensure!(
        wrong_password_err.to_string() == unknown_err.to_string(),
        "login failures should be indistinguishable"
    );
    ensure!(wrong_password_err.kind() == ErrorKind::Authorization, "kind");
    Ok(())
}
