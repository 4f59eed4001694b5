pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// All endpoints, with request tracing. CORS is layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/announcements", post(announcements::create_announcement))
        .route("/announcements/", post(announcements::create_announcement))
        .route("/announcements/active", get(announcements::list_active))
        .route("/announcements/all", get(announcements::list_all))
        .route(
            "/announcements/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
