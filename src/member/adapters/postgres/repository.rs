//! `PostgreSQL` repository implementation for member storage.

use super::{
    models::{MemberRow, NewMemberRow},
    schema::members,
};
use crate::config::PgPool;
use crate::member::{
    domain::{
        EmailAddress, LoginId, Member, MemberId, MemberName, PasswordHash, PersistedMemberData,
    },
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed member repository.
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MemberRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MemberRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MemberRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MemberRepositoryError::persistence)?
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let member_id = member.id();
        let login_id = member.login_id().clone();
        let new_row = to_new_row(member);

        self.run_blocking(move |connection| {
            diesel::insert_into(members::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_login_id_unique_violation(info.as_ref()) =>
                    {
                        MemberRepositoryError::DuplicateLoginId(login_id.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MemberRepositoryError::DuplicateMember(member_id)
                    }
                    _ => MemberRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        self.run_blocking(move |connection| {
            let row = members::table
                .filter(members::id.eq(id.into_inner()))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MemberRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn find_by_login_id(
        &self,
        login_id: &LoginId,
    ) -> MemberRepositoryResult<Option<Member>> {
        let lookup = login_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = members::table
                .filter(members::login_id.eq(&lookup))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MemberRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn exists_by_login_id(&self, login_id: &LoginId) -> MemberRepositoryResult<bool> {
        let lookup = login_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                members::table.filter(members::login_id.eq(&lookup)),
            ))
            .get_result::<bool>(connection)
            .map_err(MemberRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(member: &Member) -> NewMemberRow {
    NewMemberRow {
        id: member.id().into_inner(),
        name: member.name().as_str().to_owned(),
        login_id: member.login_id().as_str().to_owned(),
        password_hash: member.password_hash().as_str().to_owned(),
        email: member.email().as_str().to_owned(),
        created_at: member.created_at(),
    }
}

fn row_to_member(row: MemberRow) -> MemberRepositoryResult<Member> {
    let MemberRow {
        id,
        name,
        login_id,
        password_hash,
        email,
        created_at,
    } = row;

    let data = PersistedMemberData {
        id: MemberId::from_uuid(id),
        name: MemberName::new(name).map_err(MemberRepositoryError::persistence)?,
        login_id: LoginId::new(login_id).map_err(MemberRepositoryError::persistence)?,
        password_hash: PasswordHash::new(password_hash)
            .map_err(MemberRepositoryError::persistence)?,
        email: EmailAddress::new(email).map_err(MemberRepositoryError::persistence)?,
        created_at,
    };
    Ok(Member::from_persisted(data))
}

fn is_login_id_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_members_login_id_unique")
}
