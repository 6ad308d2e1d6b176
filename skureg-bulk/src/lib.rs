//! skureg-bulk library interface
//!
//! Bulk SKU registration: spreadsheet preview, streamed bulk submission,
//! single-SKU lookup and deletion, sample sheet download.

pub mod api;
pub mod bulk;
pub mod config;
pub mod db;
pub mod error;
pub mod sheet;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use skureg_common::config::BulkSettings;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Bulk submission policy
    pub settings: BulkSettings,
}

impl AppState {
    pub fn new(db: SqlitePool, settings: BulkSettings) -> Self {
        Self { db, settings }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.settings.max_upload_bytes;

    Router::new()
        .merge(api::health_routes())
        .merge(api::vendor_routes())
        .merge(api::upload_routes(upload_limit))
        .merge(api::submit_routes())
        .merge(api::sku_routes())
        .merge(api::template_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
