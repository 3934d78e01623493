use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rescue_reports::{app, run_migrations, AppConfig, AppState};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rescue_reports=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let port = config.port;

    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let db = Pool::builder().max_size(10).build(manager)?;
    let mut conn = db.get()?;
    run_migrations(&mut conn)?;
    drop(conn);

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = Arc::new(AppState { db, config });
    let router = app(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "rescue-reports starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
