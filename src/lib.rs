use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod errors;
pub mod media;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;

pub use config::AppConfig;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
}

pub fn run_migrations(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("migrations failed: {e}"))?;
    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let upload_dir = state.config.upload_dir.clone();
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(routes::health::liveness))
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/reports",
            get(routes::reports::list_reports)
                .post(routes::reports::create_report)
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .route("/api/reports/:id/status", patch(routes::reports::update_status))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .nest_service("/app", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
