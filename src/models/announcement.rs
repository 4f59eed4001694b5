use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AnnouncementError;

/// Opaque announcement identifier. Rendered as a string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AnnouncementId(Uuid);

impl AnnouncementId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnnouncementId {
    type Err = AnnouncementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| AnnouncementError::MalformedIdentifier(s.to_string()))
    }
}

/// A stored announcement.
///
/// All timestamps are ISO 8601 strings in UTC; comparing them as strings
/// gives chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: AnnouncementId,
    pub message: String,
    pub start_date: Option<String>,
    /// Always set by `create`; rows written by other tools may lack it.
    pub expiration_date: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

impl Announcement {
    pub fn from_new(id: AnnouncementId, doc: NewAnnouncement) -> Self {
        Self {
            id,
            message: doc.message,
            start_date: doc.start_date,
            expiration_date: Some(doc.expiration_date),
            created_by: doc.created_by,
            created_at: doc.created_at,
        }
    }

    /// Whether `now` falls inside `[start_date, expiration_date]`.
    /// A missing or empty bound is open on that side.
    pub fn is_active_at(&self, now: &str) -> bool {
        let not_expired = self
            .expiration_date
            .as_deref()
            .filter(|expires| !expires.is_empty())
            .map_or(true, |expires| expires >= now);
        let started = self
            .start_date
            .as_deref()
            .filter(|starts| !starts.is_empty())
            .map_or(true, |starts| starts <= now);
        not_expired && started
    }

    pub fn apply(&mut self, patch: &AnnouncementPatch) {
        if let Some(message) = &patch.message {
            self.message = message.clone();
        }
        if let Some(start_date) = &patch.start_date {
            self.start_date = Some(start_date.clone());
        }
        if let Some(expiration_date) = &patch.expiration_date {
            self.expiration_date = Some(expiration_date.clone());
        }
    }
}

/// Document handed to the record store on insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
    pub created_by: String,
    pub created_at: String,
}

/// Fields supplied by an update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementPatch {
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
}

impl AnnouncementPatch {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.start_date.is_none() && self.expiration_date.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
    /// Author; must be a registered member.
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
    pub username: String,
}

impl UpdateAnnouncementRequest {
    pub fn patch(&self) -> AnnouncementPatch {
        AnnouncementPatch {
            message: self.message.clone(),
            start_date: self.start_date.clone(),
            expiration_date: self.expiration_date.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteAnnouncementQuery {
    pub username: String,
}
