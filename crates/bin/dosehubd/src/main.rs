//! # dosehubd — dosehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`dosehub.toml`, environment variables)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use dosehub_adapter_http_axum::state::AppState;
use dosehub_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteDeviceRepository, SqliteVersionRepository,
};
use dosehub_app::services::device_service::DeviceService;
use dosehub_app::services::version_service::VersionService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services
    let catalog = config.device_types()?;
    let version_service =
        VersionService::new(SqliteVersionRepository::new(pool.clone())).with_catalog(catalog.clone());
    let device_service = DeviceService::new(
        SqliteDeviceRepository::new(pool.clone()),
        SqliteVersionRepository::new(pool),
    )
    .with_catalog(catalog);

    // HTTP
    let app = dosehub_adapter_http_axum::router::build(
        AppState::new(device_service, version_service),
        &config.server.assets_dir,
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "dosehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("dosehubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
