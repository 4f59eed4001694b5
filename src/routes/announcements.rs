use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AnnouncementError,
    models::announcement::{
        Announcement, CreateAnnouncementRequest, DeleteAnnouncementQuery,
        UpdateAnnouncementRequest,
    },
    AppState,
};

/// GET /announcements/active — public; announcements whose window contains now.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AnnouncementError> {
    state.announcements.list_active().await.map(Json)
}

/// GET /announcements/all — public; every announcement, for management screens.
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AnnouncementError> {
    state.announcements.list_all().await.map(Json)
}

/// POST /announcements — members only.
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(body): Json<CreateAnnouncementRequest>,
) -> Result<Json<Announcement>, AnnouncementError> {
    state.announcements.create(body).await.map(Json)
}

/// PUT /announcements/{id} — members only; absent fields are left unchanged.
pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>, AnnouncementError> {
    state.announcements.update(&id, body).await.map(Json)
}

/// DELETE /announcements/{id}?username= — members only.
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteAnnouncementQuery>,
) -> Result<Json<Value>, AnnouncementError> {
    state.announcements.delete(&id, &query.username).await?;
    Ok(Json(json!({ "message": "Announcement deleted successfully" })))
}
