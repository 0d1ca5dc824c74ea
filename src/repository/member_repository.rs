use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::{Member, CreateMemberRequest, UpdateMemberRequest},
    error::{AppError, Result},
    repository::MemberRepository,
};

// Database row struct that matches SQLite schema
#[derive(FromRow)]
struct MemberRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    role: Option<String>,
    join_date: Option<NaiveDateTime>,
    image_url: String,
    is_deleted: bool,
}

const MEMBER_COLUMNS: &str = r#"
    id, first_name, last_name, email, phone, address, role,
    join_date, image_url, is_deleted
"#;

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: MemberRow) -> Member {
        Member {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            role: row.role,
            join_date: row.join_date.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            image_url: row.image_url,
            is_deleted: row.is_deleted,
        }
    }

    fn not_found() -> AppError {
        AppError::NotFound("Member not found".to_string())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, request: CreateMemberRequest) -> Result<Member> {
        let join_date = request.join_date.unwrap_or_else(Utc::now).naive_utc();

        // image_url and is_deleted take their column defaults
        let result = sqlx::query(
            r#"
            INSERT INTO members (
                first_name, last_name, email, phone, address, role, join_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.role)
        .bind(join_date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created member".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE id = ?",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::row_to_member))
    }

    async fn find_active_by_id(&self, id: i64) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE id = ? AND is_deleted = 0",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::row_to_member))
    }

    async fn list_active(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM members WHERE is_deleted = 0 ORDER BY id",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::row_to_member).collect())
    }

    async fn update(&self, id: i64, update: UpdateMemberRequest) -> Result<Member> {
        let mut member = self.find_active_by_id(id).await?
            .ok_or_else(Self::not_found)?;

        update.apply_to(&mut member);

        let result = sqlx::query(
            r#"
            UPDATE members
            SET first_name = ?,
                last_name = ?,
                email = ?,
                phone = ?,
                address = ?,
                role = ?,
                join_date = ?
            WHERE id = ? AND is_deleted = 0
            "#
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(&member.role)
        .bind(member.join_date.map(|dt| dt.naive_utc()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Soft-deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        self.find_active_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated member".to_string())
        })
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        self.find_active_by_id(id).await?
            .ok_or_else(Self::not_found)?;

        let result = sqlx::query("UPDATE members SET is_deleted = 1 WHERE id = ? AND is_deleted = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        Ok(())
    }
}
