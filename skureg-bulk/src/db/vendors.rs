//! Vendor reference data (read-only for the registry)

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

/// Vendor as listed to clients
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Vendor {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
}

/// All vendors ordered by code
pub async fn list_vendors(pool: &SqlitePool) -> Result<Vec<Vendor>, sqlx::Error> {
    sqlx::query_as::<_, Vendor>(
        r#"
        SELECT vendor_code AS code, company_name AS name, product_category AS category
        FROM vendor
        ORDER BY vendor_code ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Surrogate id of a vendor code
pub async fn find_vendor_id(
    conn: &mut SqliteConnection,
    vendor_code: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM vendor WHERE vendor_code = ?")
        .bind(vendor_code)
        .fetch_optional(conn)
        .await
}
