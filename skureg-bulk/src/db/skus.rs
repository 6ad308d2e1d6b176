//! SKU lookups, deletion and batch-wide maintenance

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

/// Flattened view of one SKU aggregate
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkuInfo {
    pub sku_code: String,
    pub name: Option<String>,
    pub vendor_code: String,
    pub company_name: String,
    pub is_combo: bool,
    pub inventory_updated_at: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub hsn: Option<String>,
    pub ean: Option<String>,
    pub model_number: Option<String>,
    pub sap_code: Option<String>,
    pub mrp: Option<f64>,
    pub gst: Option<f64>,
    pub is_verified: Option<bool>,
    pub created_by: Option<String>,
    pub length: Option<f64>,
    pub breadth: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub master_carton_qty: Option<f64>,
    pub master_carton_length: Option<f64>,
    pub master_carton_breadth: Option<f64>,
    pub master_carton_height: Option<f64>,
    pub master_carton_weight: Option<f64>,
    pub size: Option<String>,
    pub color_family: Option<String>,
    pub inventory_slots: i64,
}

/// Look up a SKU by code
pub async fn find_sku_info(
    pool: &SqlitePool,
    sku_code: &str,
) -> Result<Option<SkuInfo>, sqlx::Error> {
    sqlx::query_as::<_, SkuInfo>(
        r#"
        SELECT
            s.sku_code, s.name, v.vendor_code, v.company_name,
            s.is_combo, s.inventory_updated_at,
            d.category, d.sub_category, d.hsn, d.ean, d.model_number, d.sap_code,
            d.mrp, d.gst, d.is_verified, d.created_by,
            m.length, m.breadth, m.height, m.weight, m.master_carton_qty,
            m.master_carton_length, m.master_carton_breadth,
            m.master_carton_height, m.master_carton_weight,
            m.size, m.color_family,
            (SELECT COUNT(*) FROM inventory i WHERE i.sku_id = s.id) AS inventory_slots
        FROM sku s
        JOIN vendor v ON v.id = s.vendor_id
        LEFT JOIN sku_details d ON d.sku_id = s.id
        LEFT JOIN sku_dimensions m ON m.sku_details_id = d.id
        WHERE s.sku_code = ?
        "#,
    )
    .bind(sku_code)
    .fetch_optional(pool)
    .await
}

/// Delete a SKU and, through cascades, its details, dimensions and slots
///
/// Returns false when no SKU has that code.
pub async fn delete_sku(pool: &SqlitePool, sku_code: &str) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM sku WHERE sku_code = ?")
        .bind(sku_code)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(deleted > 0)
}

/// Give every SKU detail lacking a dimension row an all-null one
///
/// Store-wide, not limited to the current batch. Running it again inserts
/// nothing. Returns the number of rows inserted.
pub async fn fill_missing_dimensions(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO sku_dimensions (sku_details_id)
        SELECT d.id
        FROM sku_details d
        LEFT JOIN sku_dimensions m ON m.sku_details_id = d.id
        WHERE m.id IS NULL
        "#,
    )
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
