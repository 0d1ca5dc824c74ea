use async_trait::async_trait;
use crate::domain::*;
use crate::error::Result;

pub mod member_repository;

pub use member_repository::SqliteMemberRepository;

/// Storage contract for members. Every lookup except `find_by_id` ignores
/// soft-deleted rows.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: CreateMemberRequest) -> Result<Member>;
    /// Any row, soft-deleted or not.
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>>;
    async fn find_active_by_id(&self, id: i64) -> Result<Option<Member>>;
    async fn list_active(&self) -> Result<Vec<Member>>;
    async fn update(&self, id: i64, update: UpdateMemberRequest) -> Result<Member>;
    async fn soft_delete(&self, id: i64) -> Result<()>;
}
