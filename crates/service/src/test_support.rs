#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate, DatabaseConfig};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> anyhow::Result<DatabaseConfig> {
    let mut cfg = DatabaseConfig::load()?;
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.connect_timeout = std::time::Duration::from_secs(5);
    cfg.acquire_timeout = std::time::Duration::from_secs(5);
    Ok(cfg)
}

/// Fresh connection for the current test's runtime, migrated on first use.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = test_config()?;
    let db = connect_with_config(&cfg).await?;
    MIGRATED
        .get_or_try_init(|| async { migrate(&db).await })
        .await?;
    Ok(db)
}
