//! Collaborators the announcement service depends on.
//!
//! Both are injected as trait objects so the service can run against
//! PostgreSQL in production and the in-memory implementations in tests or
//! local development.

pub mod memory;

use async_trait::async_trait;

use crate::models::announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement};

pub use memory::{InMemoryMembershipRegistry, InMemoryRecordStore};

/// Durable keyed storage of announcements.
///
/// Each call is atomic for a single record; nothing spans records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new document and return the identifier assigned to it.
    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId>;

    /// Every stored record, in the store's natural order.
    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>>;

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>>;

    /// Overwrite the fields present in `patch`. Returns whether a record matched.
    async fn update(&self, id: AnnouncementId, patch: &AnnouncementPatch) -> anyhow::Result<bool>;

    /// Returns whether a record matched.
    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Existence lookup for authors.
#[async_trait]
pub trait MembershipRegistry: Send + Sync {
    async fn exists(&self, member_id: &str) -> anyhow::Result<bool>;
}
