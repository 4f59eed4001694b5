use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MembershipRegistry, RecordStore};
use crate::models::announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement};

/// Record store kept in process memory. Natural order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Announcement>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId> {
        let id = AnnouncementId::new_random();
        self.records
            .write()
            .await
            .push(Announcement::from_new(id, doc.clone()));
        Ok(id)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        Ok(self.records.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn update(&self, id: AnnouncementId, patch: &AnnouncementPatch) -> anyhow::Result<bool> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|a| a.id == id) {
            Some(record) => {
                record.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool> {
        let mut records = self.records.write().await;
        match records.iter().position(|a| a.id == id) {
            Some(idx) => {
                records.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Membership registry kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryMembershipRegistry {
    members: RwLock<HashSet<String>>,
}

impl InMemoryMembershipRegistry {
    pub fn with_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: RwLock::new(members.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl MembershipRegistry for InMemoryMembershipRegistry {
    async fn exists(&self, member_id: &str) -> anyhow::Result<bool> {
        Ok(self.members.read().await.contains(member_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(message: &str) -> NewAnnouncement {
        NewAnnouncement {
            message: message.into(),
            start_date: None,
            expiration_date: "2025-01-10T00:00:00".into(),
            created_by: "t1".into(),
            created_at: "2025-01-01T00:00:00".into(),
        }
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryRecordStore::new();
        let first = store.insert(&doc("first")).await.unwrap();
        let second = store.insert(&doc("second")).await.unwrap();
        assert_ne!(first, second);

        let all = store.find_all().await.unwrap();
        let messages: Vec<_> = all.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(all[0].id, first);
    }

    #[tokio::test]
    async fn test_update_reports_match() {
        let store = InMemoryRecordStore::new();
        let id = store.insert(&doc("original")).await.unwrap();
        let patch = AnnouncementPatch {
            message: Some("changed".into()),
            ..Default::default()
        };

        assert!(store.update(id, &patch).await.unwrap());
        assert!(!store.update(AnnouncementId::new_random(), &patch).await.unwrap());

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.message, "changed");
        assert_eq!(stored.expiration_date.as_deref(), Some("2025-01-10T00:00:00"));
    }

    #[tokio::test]
    async fn test_delete_reports_match() {
        let store = InMemoryRecordStore::new();
        let id = store.insert(&doc("gone soon")).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_registry_membership() {
        let registry = InMemoryMembershipRegistry::with_members(["t1", "t2"]);
        assert!(registry.exists("t1").await.unwrap());
        assert!(registry.exists("t2").await.unwrap());
        assert!(!registry.exists("t3").await.unwrap());
        assert!(!registry.exists("").await.unwrap());

        let empty = InMemoryMembershipRegistry::default();
        assert!(!empty.exists("t1").await.unwrap());
    }
}
