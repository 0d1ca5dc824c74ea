use std::sync::Arc;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::MemberRepository,
};

/// Member lifecycle on top of a [`MemberRepository`]. Payloads arrive
/// already parsed, so malformed input never gets this far.
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_member(&self, request: CreateMemberRequest) -> Result<Member> {
        let member = self.repo.create(request).await?;
        tracing::info!(member_id = member.id, "Created member");

        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let members = self.repo.list_active().await?;
        tracing::debug!(count = members.len(), "Listed active members");

        Ok(members)
    }

    pub async fn get_member(&self, id: i64) -> Result<Member> {
        self.repo.find_active_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    pub async fn update_member(&self, id: i64, update: UpdateMemberRequest) -> Result<Member> {
        if update.is_empty() {
            return self.get_member(id).await;
        }

        let member = self.repo.update(id, update).await?;
        tracing::info!(member_id = member.id, "Updated member");

        Ok(member)
    }

    pub async fn delete_member(&self, id: i64) -> Result<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!(member_id = id, "Soft-deleted member");

        Ok(())
    }
}
