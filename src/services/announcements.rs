use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    error::AnnouncementError,
    models::announcement::{
        Announcement, AnnouncementId, CreateAnnouncementRequest, NewAnnouncement,
        UpdateAnnouncementRequest,
    },
    services::metrics,
    store::{MembershipRegistry, RecordStore},
};

/// Render `at` as ISO 8601 in UTC with microsecond precision. A zero
/// fraction is omitted, so whole-second instants compare equal to
/// whole-second stored dates such as `2025-01-10T00:00:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    if at.timestamp_subsec_micros() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Current time in the stored timestamp representation.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

/// Business rules for announcements: the membership gate on writes and the
/// active-window filter on reads. Holds no state of its own.
#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn RecordStore>,
    members: Arc<dyn MembershipRegistry>,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn RecordStore>, members: Arc<dyn MembershipRegistry>) -> Self {
        Self { store, members }
    }

    pub async fn authorize(&self, member_id: &str) -> Result<bool, AnnouncementError> {
        Ok(self.members.exists(member_id).await?)
    }

    async fn require_member(&self, member_id: &str, operation: &str) -> Result<(), AnnouncementError> {
        if self.authorize(member_id).await? {
            Ok(())
        } else {
            warn!("rejected {operation} by unknown member {member_id:?}");
            Err(AnnouncementError::Unauthorized)
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Announcement>, AnnouncementError> {
        let all = self.store.find_all().await?;
        metrics::record_read("all");
        Ok(all)
    }

    pub async fn list_active(&self) -> Result<Vec<Announcement>, AnnouncementError> {
        self.list_active_at(&timestamp_now()).await
    }

    /// Records whose window contains `now`, in store order.
    pub async fn list_active_at(&self, now: &str) -> Result<Vec<Announcement>, AnnouncementError> {
        let active = self
            .store
            .find_all()
            .await?
            .into_iter()
            .filter(|a| a.is_active_at(now))
            .collect();
        metrics::record_read("active");
        Ok(active)
    }

    pub async fn create(
        &self,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement, AnnouncementError> {
        let result = self.create_inner(req).await;
        metrics::record_write("create", &result);
        result
    }

    async fn create_inner(
        &self,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement, AnnouncementError> {
        self.require_member(&req.username, "create").await?;

        let doc = NewAnnouncement {
            message: req.message,
            start_date: req.start_date,
            expiration_date: req.expiration_date,
            created_by: req.username,
            created_at: timestamp_now(),
        };
        let id = self.store.insert(&doc).await?;
        info!("announcement {id} created by {}", doc.created_by);

        Ok(Announcement::from_new(id, doc))
    }

    /// Apply the supplied fields to announcement `id` and return its new state.
    pub async fn update(
        &self,
        id: &str,
        req: UpdateAnnouncementRequest,
    ) -> Result<Announcement, AnnouncementError> {
        let result = self.update_inner(id, req).await;
        metrics::record_write("update", &result);
        result
    }

    async fn update_inner(
        &self,
        id: &str,
        req: UpdateAnnouncementRequest,
    ) -> Result<Announcement, AnnouncementError> {
        self.require_member(&req.username, "update").await?;
        let id: AnnouncementId = id.parse()?;

        let patch = req.patch();
        if patch.is_empty() {
            return Err(AnnouncementError::BadRequest("No fields to update".into()));
        }

        if !self.store.update(id, &patch).await? {
            return Err(AnnouncementError::NotFound);
        }
        info!("announcement {id} updated by {}", req.username);

        // A concurrent delete can land between the update and this read.
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AnnouncementError::NotFound)
    }

    pub async fn delete(&self, id: &str, author: &str) -> Result<(), AnnouncementError> {
        let result = self.delete_inner(id, author).await;
        metrics::record_write("delete", &result);
        result
    }

    async fn delete_inner(&self, id: &str, author: &str) -> Result<(), AnnouncementError> {
        self.require_member(author, "delete").await?;
        let id: AnnouncementId = id.parse()?;

        if !self.store.delete(id).await? {
            return Err(AnnouncementError::NotFound);
        }
        info!("announcement {id} deleted by {author}");
        Ok(())
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
