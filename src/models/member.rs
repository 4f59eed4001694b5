use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered author. Only the id is consulted when authorizing writes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
