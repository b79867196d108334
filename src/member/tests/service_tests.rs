//! Service orchestration tests for member registration and login.

use std::sync::Arc;

use crate::error::ErrorKind;
use crate::member::{
    adapters::{Sha256PasswordHasher, memory::InMemoryMemberRepository},
    domain::{MemberDomainError, PasswordHash},
    ports::{PasswordHashError, hasher::MockPasswordHasher},
    services::{LoginRequest, MemberService, MemberServiceError, RegisterMemberRequest},
};
use mockable::DefaultClock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

type TestService = MemberService<InMemoryMemberRepository, Sha256PasswordHasher, DefaultClock>;

#[fixture]
fn service() -> TestService {
    MemberService::new(
        Arc::new(InMemoryMemberRepository::new()),
        Arc::new(Sha256PasswordHasher::new()),
        Arc::new(DefaultClock),
    )
}

fn alice() -> RegisterMemberRequest {
    RegisterMemberRequest::new("Alice", "alice", "correct horse", "alice@example.com")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_persists_member_with_hashed_password(service: TestService) {
    let member = service.register(alice()).await.expect("registration");

    assert_eq!(member.name().as_str(), "Alice");
    assert_eq!(member.login_id().as_str(), "alice");
    assert_ne!(member.password_hash().as_str(), "correct horse");

    let found = service.find_member(member.id()).await.expect("lookup");
    assert_eq!(found, member);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_duplicate_login_id(service: TestService) {
    service.register(alice()).await.expect("first registration");

    let result = service
        .register(RegisterMemberRequest::new(
            "Other",
            "alice",
            "another pw",
            "other@example.com",
        ))
        .await;

    let Err(err) = result else {
        panic!("duplicate login id should be rejected");
    };
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(err, MemberServiceError::DuplicateLoginId(ref id) if id.as_str() == "alice"));
}

#[rstest]
#[case(RegisterMemberRequest::new(" ", "bob", "pw", "bob@example.com"), MemberDomainError::EmptyName)]
#[case(RegisterMemberRequest::new("Bob", "", "pw", "bob@example.com"), MemberDomainError::EmptyLoginId)]
#[case(RegisterMemberRequest::new("Bob", "bob", "  ", "bob@example.com"), MemberDomainError::EmptyPassword)]
#[case(RegisterMemberRequest::new("Bob", "bob", "pw", ""), MemberDomainError::EmptyEmail)]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_invalid_fields(
    service: TestService,
    #[case] request: RegisterMemberRequest,
    #[case] expected: MemberDomainError,
) {
    let result = service.register(request).await;
    assert!(matches!(result, Err(MemberServiceError::Domain(ref err)) if *err == expected));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_returns_identity_for_matching_credentials(service: TestService) {
    let member = service.register(alice()).await.expect("registration");

    let login = service
        .login(LoginRequest::new("alice", "correct horse"))
        .await
        .expect("login");

    assert_eq!(login.id, member.id());
    assert_eq!(login.name.as_str(), "Alice");
}

#[rstest]
#[case(LoginRequest::new("alice", "wrong"))]
#[case(LoginRequest::new("nobody", "correct horse"))]
#[case(LoginRequest::new("alice", ""))]
#[case(LoginRequest::new("", "correct horse"))]
#[tokio::test(flavor = "multi_thread")]
async fn login_failures_share_one_error(service: TestService, #[case] request: LoginRequest) {
    service.register(alice()).await.expect("registration");

    let result = service.login(request).await;
    assert!(matches!(result, Err(MemberServiceError::LoginFailed)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_member_reports_missing_member(service: TestService) {
    let id = crate::member::domain::MemberId::new();
    let result = service.find_member(id).await;
    assert!(matches!(result, Err(MemberServiceError::MemberNotFound(missing)) if missing == id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_hashes_through_the_hasher_port() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(eq("plain"))
        .times(1)
        .returning(|_| PasswordHash::new("hashed").map_err(|_| PasswordHashError::EmptyPassword));
    let service = MemberService::new(
        Arc::new(InMemoryMemberRepository::new()),
        Arc::new(hasher),
        Arc::new(DefaultClock),
    );

    let member = service
        .register(RegisterMemberRequest::new(
            "Carol",
            "carol",
            "plain",
            "carol@example.com",
        ))
        .await
        .expect("registration");

    assert_eq!(member.password_hash().as_str(), "hashed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hasher_failure_surfaces_as_validation_error() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Err(PasswordHashError::EmptyPassword));
    let service = MemberService::new(
        Arc::new(InMemoryMemberRepository::new()),
        Arc::new(hasher),
        Arc::new(DefaultClock),
    );

    let result = service.register(alice()).await;
    let Err(err) = result else {
        panic!("hasher failure should abort registration");
    };
    assert_eq!(err.kind(), ErrorKind::Validation);
}
