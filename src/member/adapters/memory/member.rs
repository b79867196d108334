//! In-memory repository for member registration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::member::{
    domain::{LoginId, Member, MemberId},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};

/// Thread-safe in-memory member repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    state: Arc<RwLock<InMemoryMemberState>>,
}

#[derive(Debug, Default)]
struct InMemoryMemberState {
    members: HashMap<MemberId, Member>,
    login_index: HashMap<LoginId, MemberId>,
}

impl InMemoryMemberRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> MemberRepositoryError {
    MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.members.contains_key(&member.id()) {
            return Err(MemberRepositoryError::DuplicateMember(member.id()));
        }
        if state.login_index.contains_key(member.login_id()) {
            return Err(MemberRepositoryError::DuplicateLoginId(
                member.login_id().clone(),
            ));
        }

        state
            .login_index
            .insert(member.login_id().clone(), member.id());
        state.members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.members.get(&id).cloned())
    }

    async fn find_by_login_id(
        &self,
        login_id: &LoginId,
    ) -> MemberRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(poisoned)?;
        let member = state
            .login_index
            .get(login_id)
            .and_then(|id| state.members.get(id))
            .cloned();
        Ok(member)
    }

    async fn exists_by_login_id(&self, login_id: &LoginId) -> MemberRepositoryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.login_index.contains_key(login_id))
    }
}
