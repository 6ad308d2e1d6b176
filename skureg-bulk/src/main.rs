//! skureg-bulk - Bulk SKU registration service
//!
//! Previews uploaded SKU sheets, registers SKUs in bulk with streamed
//! progress, and serves single-SKU lookup/deletion and the sample sheet.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use skureg_bulk::config::{Args, ServiceConfig};
use skureg_bulk::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting skureg-bulk v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = ServiceConfig::resolve(&args)?;

    info!("Database path: {}", config.database_path.display());
    info!(
        "Bulk policy: {} inventory slots per SKU, commit mode {}",
        config.bulk.inventory_slots, config.bulk.commit_mode
    );

    let pool = match skureg_bulk::db::init_database_pool(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let state = AppState::new(pool, config.bulk.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("skureg-bulk listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
