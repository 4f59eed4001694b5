use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use announcements_api::{
    config::{Config, StorageBackend},
    db::{self, PgMembershipRegistry, PgRecordStore},
    routes,
    services::announcements::AnnouncementService,
    store::{InMemoryMembershipRegistry, InMemoryRecordStore, MembershipRegistry, RecordStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (store, members): (Arc<dyn RecordStore>, Arc<dyn MembershipRegistry>) =
        match config.storage_backend {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for postgres storage"))?;
                let pool = db::create_pool(url, config.database_max_connections).await?;
                db::run_migrations(&pool).await?;
                info!("Database connected and migrations applied");
                let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(pool.clone()));
                let members: Arc<dyn MembershipRegistry> = Arc::new(PgMembershipRegistry::new(pool));
                (store, members)
            }
            StorageBackend::Memory => {
                info!(
                    "Using in-memory storage with {} seeded member(s)",
                    config.seed_members.len()
                );
                let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
                let members: Arc<dyn MembershipRegistry> = Arc::new(
                    InMemoryMembershipRegistry::with_members(config.seed_members.iter().cloned()),
                );
                (store, members)
            }
        };

    let state = AppState {
        announcements: AnnouncementService::new(store, members),
    };

    let cors_origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin)?),
        None => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(cors_origin);

    let app = routes::router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("announcements API listening on {} ({} storage)", addr, config.storage_backend);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
