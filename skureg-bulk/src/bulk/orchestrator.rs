//! Batch orchestration for bulk SKU submissions
//!
//! Drives one submission from raw rows to a terminal event:
//! 1. normalize rows (rows without a SKU code are dropped)
//! 2. resolve the vendor
//! 3. write each record in input order, classifying it inserted/skipped/error
//! 4. backfill missing dimension rows store-wide
//! 5. emit the summary
//!
//! Record failures are contained to the record. Transaction control and the
//! dimension backfill are fatal for the batch.

use sqlx::{Acquire, Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use skureg_common::config::{BulkSettings, CommitMode};

use super::events::{BatchSummary, ProgressEvent, ProgressSender, RecordError, RecordStatus};
use super::normalize::{normalize_rows, SkuRecord};
use super::writer::{write_record, WriteContext, WriteOutcome};
use crate::db::{skus, vendors};
use crate::sheet::RawRow;

/// One submission as received from the client
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub vendor_code: String,
    /// Creator identity; blank falls back to the configured default
    pub created_by: Option<String>,
    pub rows: Vec<RawRow>,
}

/// Classification of one record after its write attempt
#[derive(Debug, Clone, PartialEq)]
enum RecordOutcome {
    Inserted,
    Skipped,
    Failed(String),
}

/// Batch-level failure; aborts the loop
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Unknown vendor code: {0}")]
    UnknownVendor(String),

    #[error("Transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),

    #[error("Dimension backfill failed: {0}")]
    Backfill(#[source] sqlx::Error),
}

/// Runs submissions against the store
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    db: SqlitePool,
    settings: BulkSettings,
}

impl BatchOrchestrator {
    pub fn new(db: SqlitePool, settings: BulkSettings) -> Self {
        Self { db, settings }
    }

    /// Process a submission, pushing events into `events`
    ///
    /// Always ends with exactly one terminal event. The returned value mirrors
    /// that event.
    pub async fn run(
        &self,
        request: BatchRequest,
        events: &ProgressSender,
    ) -> Result<BatchSummary, BatchError> {
        let batch_id = Uuid::new_v4();
        let input_rows = request.rows.len();

        let (records, dropped) = normalize_rows(&request.rows);
        if dropped > 0 {
            warn!(%batch_id, dropped, "Dropping rows without SKU Code");
        }

        let ctx = WriteContext {
            vendor_code: request.vendor_code.trim().to_string(),
            created_by: self.creator(request.created_by.as_deref()),
            inventory_slots: self.settings.inventory_slots,
        };

        info!(
            %batch_id,
            vendor_code = %ctx.vendor_code,
            created_by = %ctx.created_by,
            input_rows,
            records = records.len(),
            commit_mode = %self.settings.commit_mode,
            "Bulk SKU submission started"
        );

        let result = match self.settings.commit_mode {
            CommitMode::PerRecord => self.run_per_record(&ctx, &records, events).await,
            CommitMode::Batch => self.run_batch(&ctx, &records, events).await,
        };

        match result {
            Ok(mut summary) => {
                summary.dropped = dropped;
                info!(
                    %batch_id,
                    inserted = summary.inserted.len(),
                    skipped = summary.skipped.len(),
                    errors = summary.errors.len(),
                    dropped,
                    "Bulk SKU submission completed"
                );
                events.emit(ProgressEvent::completed(summary.clone()));
                Ok(summary)
            }
            Err(e) => {
                error!(%batch_id, error = %e, "Bulk SKU submission failed");
                events.emit(ProgressEvent::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn creator(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.settings.default_creator)
            .to_string()
    }

    /// Each record commits on its own; events go out as soon as known
    async fn run_per_record(
        &self,
        ctx: &WriteContext,
        records: &[SkuRecord],
        events: &ProgressSender,
    ) -> Result<BatchSummary, BatchError> {
        {
            let mut conn = self.db.acquire().await.map_err(BatchError::Transaction)?;
            ensure_vendor(&mut conn, &ctx.vendor_code).await?;
        }

        let mut summary = BatchSummary {
            total: records.len(),
            ..Default::default()
        };

        for (index, record) in records.iter().enumerate() {
            let tx = self.db.begin().await.map_err(BatchError::Transaction)?;
            let outcome = process_record(tx, ctx, record).await;
            events.emit(record_event(index, records.len(), record, &outcome));
            tally(&mut summary, record, outcome);
        }

        let mut tx = self.db.begin().await.map_err(BatchError::Transaction)?;
        let backfilled = skus::fill_missing_dimensions(&mut tx)
            .await
            .map_err(BatchError::Backfill)?;
        tx.commit().await.map_err(BatchError::Transaction)?;
        debug!(backfilled, "Dimension backfill committed");

        Ok(summary)
    }

    /// One enclosing transaction, a savepoint per record; events are held
    /// back until the commit succeeds
    async fn run_batch(
        &self,
        ctx: &WriteContext,
        records: &[SkuRecord],
        events: &ProgressSender,
    ) -> Result<BatchSummary, BatchError> {
        let mut tx = self.db.begin().await.map_err(BatchError::Transaction)?;

        if let Err(e) = ensure_vendor(&mut tx, &ctx.vendor_code).await {
            rollback(tx).await;
            return Err(e);
        }

        let mut summary = BatchSummary {
            total: records.len(),
            ..Default::default()
        };
        let mut pending = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            // Dropping `tx` on this error path rolls the batch back
            let savepoint = tx.begin().await.map_err(BatchError::Transaction)?;
            let outcome = process_record(savepoint, ctx, record).await;
            pending.push(record_event(index, records.len(), record, &outcome));
            tally(&mut summary, record, outcome);
        }

        match skus::fill_missing_dimensions(&mut tx).await {
            Ok(backfilled) => debug!(backfilled, "Dimension backfill staged"),
            Err(e) => {
                rollback(tx).await;
                return Err(BatchError::Backfill(e));
            }
        }

        tx.commit().await.map_err(BatchError::Transaction)?;

        for event in pending {
            events.emit(event);
        }

        Ok(summary)
    }
}

async fn ensure_vendor(
    conn: &mut sqlx::SqliteConnection,
    vendor_code: &str,
) -> Result<(), BatchError> {
    match vendors::find_vendor_id(conn, vendor_code).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(BatchError::UnknownVendor(vendor_code.to_string())),
        Err(e) => Err(BatchError::Transaction(e)),
    }
}

/// Write one record inside `tx`, committing only a successful insert
async fn process_record(
    mut tx: Transaction<'_, Sqlite>,
    ctx: &WriteContext,
    record: &SkuRecord,
) -> RecordOutcome {
    match write_record(&mut tx, ctx, record).await {
        Ok(WriteOutcome::Inserted { sku_id }) => match tx.commit().await {
            Ok(()) => {
                debug!(sku_code = %record.sku_code, sku_id, "SKU inserted");
                RecordOutcome::Inserted
            }
            Err(e) => {
                warn!(sku_code = %record.sku_code, error = %e, "SKU commit failed");
                RecordOutcome::Failed(e.to_string())
            }
        },
        Ok(WriteOutcome::Duplicate) => {
            debug!(sku_code = %record.sku_code, "SKU already exists - skipping");
            rollback(tx).await;
            RecordOutcome::Skipped
        }
        Err(e) => {
            warn!(sku_code = %record.sku_code, error = %e, "SKU write failed");
            rollback(tx).await;
            RecordOutcome::Failed(e.to_string())
        }
    }
}

async fn rollback(tx: Transaction<'_, Sqlite>) {
    if let Err(e) = tx.rollback().await {
        warn!(error = %e, "Rollback failed");
    }
}

fn record_event(
    index: usize,
    total: usize,
    record: &SkuRecord,
    outcome: &RecordOutcome,
) -> ProgressEvent {
    let (status, error) = match outcome {
        RecordOutcome::Inserted => (RecordStatus::Inserted, None),
        RecordOutcome::Skipped => (RecordStatus::Skipped, None),
        RecordOutcome::Failed(msg) => (RecordStatus::Error, Some(msg.clone())),
    };
    ProgressEvent::Record {
        progress: index + 1,
        total,
        status,
        sku_code: record.sku_code.clone(),
        error,
    }
}

fn tally(summary: &mut BatchSummary, record: &SkuRecord, outcome: RecordOutcome) {
    let code = record.sku_code.clone();
    match outcome {
        RecordOutcome::Inserted => summary.inserted.push(code),
        RecordOutcome::Skipped => summary.skipped.push(code),
        RecordOutcome::Failed(error) => summary.errors.push(RecordError {
            sku_code: code,
            error,
        }),
    }
}
