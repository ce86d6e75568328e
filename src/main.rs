use std::net::SocketAddr;
use std::sync::Arc;

use payrail::api::{self, AppState};
use payrail::config::AppConfig;
use payrail::db::Database;
use payrail::logging::init_logging;
use payrail::store::PgStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("PAYRAIL_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = AppConfig::load(&config_path)?;

    let _guard = init_logging(&config);
    info!(config = %config_path, "Starting payrail transfer service");

    let db = Database::connect(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db.into_pool()));

    let state = Arc::new(AppState::new(store));
    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
