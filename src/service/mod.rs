pub mod member_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::repository::*;
use member_service::MemberService;

pub struct ServiceContext {
    pub member_service: Arc<MemberService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool) -> Self {
        let member_repo: Arc<dyn MemberRepository> =
            Arc::new(SqliteMemberRepository::new(db_pool.clone()));

        Self::with_repository(member_repo, db_pool)
    }

    pub fn with_repository(member_repo: Arc<dyn MemberRepository>, db_pool: SqlitePool) -> Self {
        let member_service = Arc::new(MemberService::new(member_repo));

        Self {
            member_service,
            db_pool,
        }
    }
}
