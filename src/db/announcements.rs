use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    models::announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement},
    store::RecordStore,
};

const ANNOUNCEMENT_COLS: &str =
    "id, message, start_date, expiration_date, created_by, created_at";

/// Record store backed by the `announcements` table.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId> {
        let id = sqlx::query_scalar::<_, AnnouncementId>(
            "INSERT INTO announcements (message, start_date, expiration_date, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&doc.message)
        .bind(&doc.start_date)
        .bind(&doc.expiration_date)
        .bind(&doc.created_by)
        .bind(&doc.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLS} FROM announcements ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: AnnouncementId, patch: &AnnouncementPatch) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE announcements
             SET message = COALESCE($1, message),
                 start_date = COALESCE($2, start_date),
                 expiration_date = COALESCE($3, expiration_date)
             WHERE id = $4",
        )
        .bind(&patch.message)
        .bind(&patch.start_date)
        .bind(&patch.expiration_date)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    // These run against a real database: `DATABASE_URL=... cargo test -- --ignored`
    async fn store() -> PgRecordStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let pool = db::create_pool(&url, 2).await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        PgRecordStore::new(pool)
    }

    fn doc(message: &str) -> NewAnnouncement {
        NewAnnouncement {
            message: message.into(),
            start_date: Some("2025-01-01T00:00:00".into()),
            expiration_date: "2025-01-10T00:00:00".into(),
            created_by: "t1".into(),
            created_at: "2024-12-31T09:30:00.250000".into(),
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_partial_update_keeps_unset_columns() {
        let store = store().await;
        let id = store.insert(&doc("Original")).await.unwrap();

        let patch = AnnouncementPatch {
            message: Some("Edited".into()),
            ..Default::default()
        };
        assert!(store.update(id, &patch).await.unwrap());

        let row = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.message, "Edited");
        assert_eq!(row.start_date.as_deref(), Some("2025-01-01T00:00:00"));
        assert_eq!(row.expiration_date.as_deref(), Some("2025-01-10T00:00:00"));
        assert_eq!(row.created_by, "t1");
        assert_eq!(row.created_at, "2024-12-31T09:30:00.250000");

        let patch = AnnouncementPatch {
            expiration_date: Some("2025-02-01T00:00:00".into()),
            ..Default::default()
        };
        assert!(store.update(id, &patch).await.unwrap());
        let row = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.message, "Edited");
        assert_eq!(row.expiration_date.as_deref(), Some("2025-02-01T00:00:00"));

        assert!(!store.update(AnnouncementId::new_random(), &patch).await.unwrap());
        assert!(store.delete(id).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_find_all_follows_insertion_order() {
        let store = store().await;
        let mut inserted = Vec::new();
        for message in ["first", "second", "third"] {
            inserted.push(store.insert(&doc(message)).await.unwrap());
        }

        let seen: Vec<AnnouncementId> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .filter(|id| inserted.contains(id))
            .collect();
        assert_eq!(seen, inserted);

        for id in inserted {
            store.delete(id).await.unwrap();
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_reports_match() {
        let store = store().await;
        let id = store.insert(&doc("Short-lived")).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
