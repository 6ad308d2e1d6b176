//! Database access for skureg-bulk
//!
//! SQLite store holding vendors, SKUs, SKU details, SKU dimensions and
//! inventory slots. Foreign keys are enforced; deleting a SKU cascades to its
//! children.

pub mod skus;
pub mod vendors;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Schema statements, applied in order at startup
const SCHEMA: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS vendor (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        vendor_code TEXT NOT NULL UNIQUE,
        company_name TEXT NOT NULL,
        product_category TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sku (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sku_code TEXT NOT NULL UNIQUE,
        name TEXT,
        vendor_id INTEGER NOT NULL REFERENCES vendor(id),
        is_combo INTEGER NOT NULL DEFAULT 0,
        inventory_updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sku_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sku_id INTEGER NOT NULL UNIQUE REFERENCES sku(id) ON DELETE CASCADE,
        category TEXT,
        sub_category TEXT,
        hsn TEXT,
        ean TEXT,
        model_number TEXT,
        sap_code TEXT,
        mrp REAL,
        gst REAL,
        is_verified INTEGER NOT NULL DEFAULT 0,
        created_by TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sku_dimensions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sku_details_id INTEGER NOT NULL UNIQUE REFERENCES sku_details(id) ON DELETE CASCADE,
        length REAL,
        breadth REAL,
        height REAL,
        weight REAL,
        master_carton_qty REAL,
        master_carton_length REAL,
        master_carton_breadth REAL,
        master_carton_height REAL,
        master_carton_weight REAL,
        size TEXT,
        color_family TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inventory (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sku_id INTEGER NOT NULL REFERENCES sku(id) ON DELETE CASCADE,
        slot_id TEXT NOT NULL UNIQUE,
        quantity INTEGER NOT NULL DEFAULT 0,
        expiry_date TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_inventory_sku_id ON inventory(sku_id)",
];

/// Open (or create) the database and apply the schema
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tracing::debug!("Connecting to database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to open database")?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create registry tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply schema")?;
    }

    tracing::info!("Database tables initialized (vendor, sku, sku_details, sku_dimensions, inventory)");

    Ok(())
}
