//! Persistence of one SKU aggregate
//!
//! Writes, in order: SKU, SKU detail, optional SKU dimension, inventory slots.
//! The caller owns the transaction; a duplicate SKU code is reported as
//! [`WriteOutcome::Duplicate`] instead of an error so the caller can roll the
//! record back and classify it as skipped.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::normalize::SkuRecord;

/// Per-batch inputs shared by every record
#[derive(Debug, Clone)]
pub struct WriteContext {
    pub vendor_code: String,
    pub created_by: String,
    pub inventory_slots: u32,
}

/// Result of a write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted { sku_id: i64 },
    /// The SKU code already exists; nothing was written
    Duplicate,
}

/// Synthetic inventory slot identifier (`index` is 1-based)
pub fn slot_id(sku_code: &str, index: u32) -> String {
    format!("{}_slot_{}", sku_code, index)
}

/// Write the full aggregate for one record
pub async fn write_record(
    conn: &mut SqliteConnection,
    ctx: &WriteContext,
    record: &SkuRecord,
) -> Result<WriteOutcome, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let sku_id = match insert_sku(conn, ctx, record, &now).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Ok(WriteOutcome::Duplicate);
        }
        Err(e) => return Err(e),
    };

    let details_id = insert_details(conn, ctx, record, sku_id, &now).await?;

    if !record.dimensions.is_empty() {
        insert_dimensions(conn, record, details_id).await?;
    }

    insert_inventory_slots(conn, &record.sku_code, sku_id, ctx.inventory_slots).await?;

    Ok(WriteOutcome::Inserted { sku_id })
}

async fn insert_sku(
    conn: &mut SqliteConnection,
    ctx: &WriteContext,
    record: &SkuRecord,
    now: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO sku (sku_code, name, vendor_id, is_combo, inventory_updated_at)
        VALUES (?, ?, (SELECT id FROM vendor WHERE vendor_code = ?), 0, ?)
        "#,
    )
    .bind(&record.sku_code)
    .bind(&record.name)
    .bind(&ctx.vendor_code)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn insert_details(
    conn: &mut SqliteConnection,
    ctx: &WriteContext,
    record: &SkuRecord,
    sku_id: i64,
    now: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO sku_details (
            sku_id, category, sub_category, hsn, ean, model_number, sap_code,
            mrp, gst, is_verified, created_by, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)
        "#,
    )
    .bind(sku_id)
    .bind(&record.category)
    .bind(&record.sub_category)
    .bind(&record.hsn)
    .bind(&record.ean)
    .bind(&record.model_number)
    .bind(&record.sap_code)
    .bind(record.mrp)
    .bind(record.gst)
    .bind(&ctx.created_by)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn insert_dimensions(
    conn: &mut SqliteConnection,
    record: &SkuRecord,
    details_id: i64,
) -> Result<(), sqlx::Error> {
    let dims = &record.dimensions;

    sqlx::query(
        r#"
        INSERT INTO sku_dimensions (
            sku_details_id, length, breadth, height, weight,
            master_carton_qty, master_carton_length, master_carton_breadth,
            master_carton_height, master_carton_weight, size, color_family
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(details_id)
    .bind(dims.length)
    .bind(dims.breadth)
    .bind(dims.height)
    .bind(dims.weight)
    .bind(dims.master_carton_qty)
    .bind(dims.master_carton_length)
    .bind(dims.master_carton_breadth)
    .bind(dims.master_carton_height)
    .bind(dims.master_carton_weight)
    .bind(&dims.size)
    .bind(&dims.color)
    .execute(conn)
    .await?;

    Ok(())
}

/// Zero-quantity, non-expiring slots in a single statement
async fn insert_inventory_slots(
    conn: &mut SqliteConnection,
    sku_code: &str,
    sku_id: i64,
    slots: u32,
) -> Result<(), sqlx::Error> {
    if slots == 0 {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO inventory (sku_id, slot_id, quantity, expiry_date) ");

    builder.push_values(1..=slots, |mut row, index| {
        row.push_bind(sku_id)
            .push_bind(slot_id(sku_code, index))
            .push_bind(0_i64)
            .push_bind(None::<String>);
    });

    builder.build().execute(conn).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_format() {
        assert_eq!(slot_id("SKU1", 1), "SKU1_slot_1");
        assert_eq!(slot_id("AB-9", 5), "AB-9_slot_5");
    }
}
