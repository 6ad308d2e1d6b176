//! Shared test helpers: temp databases, vendor seeding, fault triggers,
//! and batch runners that collect the progress stream.

#![allow(dead_code)]

use serde_json::Value;
use skureg_bulk::bulk::{
    progress_channel, BatchError, BatchOrchestrator, BatchRequest, BatchSummary, ProgressEvent,
};
use skureg_bulk::sheet::RawRow;
use skureg_common::config::{BulkSettings, CommitMode};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const VENDOR: &str = "V001";

/// Temp database with schema applied and vendor `V001` seeded
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test_skureg.db");

    let pool = skureg_bulk::db::init_database_pool(&db_path)
        .await
        .expect("Should create test database");

    seed_vendor(&pool, VENDOR, "Acme Traders", Some("Kitchen")).await;

    (temp_dir, pool)
}

pub async fn seed_vendor(pool: &SqlitePool, code: &str, name: &str, category: Option<&str>) {
    sqlx::query("INSERT INTO vendor (vendor_code, company_name, product_category) VALUES (?, ?, ?)")
        .bind(code)
        .bind(name)
        .bind(category)
        .execute(pool)
        .await
        .expect("Should seed vendor");
}

/// Make SKU detail inserts with category `REJECT` fail
pub async fn install_detail_fault(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TRIGGER reject_detail BEFORE INSERT ON sku_details
        WHEN NEW.category = 'REJECT'
        BEGIN
            SELECT RAISE(ABORT, 'detail rejected');
        END
        "#,
    )
    .execute(pool)
    .await
    .expect("Should install detail trigger");
}

/// Make every all-null dimension insert (the backfill) fail
pub async fn install_backfill_fault(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TRIGGER reject_backfill BEFORE INSERT ON sku_dimensions
        WHEN NEW.length IS NULL AND NEW.breadth IS NULL AND NEW.height IS NULL
            AND NEW.weight IS NULL AND NEW.master_carton_qty IS NULL
            AND NEW.size IS NULL AND NEW.color_family IS NULL
        BEGIN
            SELECT RAISE(ABORT, 'backfill rejected');
        END
        "#,
    )
    .execute(pool)
    .await
    .expect("Should install backfill trigger");
}

pub fn settings(mode: CommitMode) -> BulkSettings {
    BulkSettings {
        commit_mode: mode,
        ..Default::default()
    }
}

/// Turn JSON objects into raw rows
pub fn rows(values: Vec<Value>) -> Vec<RawRow> {
    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            other => panic!("row must be an object, got {}", other),
        })
        .collect()
}

/// Run one batch and collect every event it emitted
pub async fn run_batch(
    pool: &SqlitePool,
    settings: BulkSettings,
    created_by: Option<&str>,
    raw_rows: Vec<RawRow>,
) -> (Result<BatchSummary, BatchError>, Vec<ProgressEvent>) {
    run_batch_for_vendor(pool, settings, VENDOR, created_by, raw_rows).await
}

pub async fn run_batch_for_vendor(
    pool: &SqlitePool,
    settings: BulkSettings,
    vendor_code: &str,
    created_by: Option<&str>,
    raw_rows: Vec<RawRow>,
) -> (Result<BatchSummary, BatchError>, Vec<ProgressEvent>) {
    let orchestrator = BatchOrchestrator::new(pool.clone(), settings);
    let (sender, mut rx) = progress_channel();

    let request = BatchRequest {
        vendor_code: vendor_code.to_string(),
        created_by: created_by.map(str::to_string),
        rows: raw_rows,
    };

    let result = orchestrator.run(request, &sender).await;
    drop(sender);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    (result, events)
}

pub async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(pool)
        .await
        .expect("count query")
}

pub async fn sku_exists(pool: &SqlitePool, sku_code: &str) -> bool {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sku WHERE sku_code = ?")
        .bind(sku_code)
        .fetch_one(pool)
        .await
        .expect("sku lookup");
    n > 0
}
