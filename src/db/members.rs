use async_trait::async_trait;
use sqlx::PgPool;

use crate::{models::member::Member, store::MembershipRegistry};

/// Membership registry backed by the `members` table.
pub struct PgMembershipRegistry {
    pool: PgPool,
}

impl PgMembershipRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a member, or refresh the display name of an existing one.
    pub async fn add(&self, id: &str, display_name: Option<&str>) -> anyhow::Result<Member> {
        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, display_name)
             VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET
                 display_name = COALESCE(EXCLUDED.display_name, members.display_name)
             RETURNING id, display_name, created_at",
        )
        .bind(id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }

    pub async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, display_name, created_at FROM members ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }
}

#[async_trait]
impl MembershipRegistry for PgMembershipRegistry {
    async fn exists(&self, member_id: &str) -> anyhow::Result<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
                .bind(member_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(found)
    }
}
