use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use models::db::{connect_with_config, migrate, DatabaseConfig};
use service::product::{repo::seaorm::SeaOrmProductRepository, ProductRepository};

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Public entry: connect storage, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = configs::AppConfig::load_and_validate()?;

    let db = connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    if cfg.database.auto_migrate {
        migrate(&db).await?;
    }

    let repo: Arc<dyn ProductRepository> = Arc::new(SeaOrmProductRepository::new(db));
    let app: Router = routes::build_router(AppState::new(repo), build_cors());

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting product catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
