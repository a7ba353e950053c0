//! cine-rs server binary
//!
//! Loads configuration, picks a storage backend, seeds roles and serves the
//! API until Ctrl+C or SIGTERM.

use anyhow::Result;
use std::sync::Arc;

use cine::config::AppConfig;
use cine::server::{ServerHost, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let bind = config.server.bind.clone();

    let host = build_host(config).await?;
    host.seed().await?;

    let builder = host.builder();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        entities = ?builder.entity_types(),
        "starting cine-rs"
    );
    builder.serve(&bind).await
}

async fn build_host(config: AppConfig) -> Result<ServerHost> {
    #[cfg(feature = "mysql")]
    let config = match config.database.connection_string.clone() {
        Some(url) => return mysql_host(config, &url).await,
        None => config,
    };

    in_memory_host(config)
}

#[cfg(feature = "mysql")]
async fn mysql_host(config: AppConfig, url: &str) -> Result<ServerHost> {
    use cine::storage::mysql::{MysqlCatalog, MysqlUserStore, connect, ensure_schema};

    let pool = connect(url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("using MySQL storage");

    Ok(ServerHost::new(
        config,
        Arc::new(MysqlCatalog::new(pool.clone())),
        Arc::new(MysqlUserStore::new(pool)),
    )?)
}

#[cfg(feature = "in-memory")]
fn in_memory_host(config: AppConfig) -> Result<ServerHost> {
    use cine::storage::{InMemoryCatalog, InMemoryUserStore};

    tracing::info!("using in-memory storage");
    Ok(ServerHost::new(
        config,
        Arc::new(InMemoryCatalog::new()),
        Arc::new(InMemoryUserStore::new()),
    )?)
}

#[cfg(not(feature = "in-memory"))]
fn in_memory_host(_config: AppConfig) -> Result<ServerHost> {
    anyhow::bail!("no database configured and the in-memory backend is not compiled in")
}
