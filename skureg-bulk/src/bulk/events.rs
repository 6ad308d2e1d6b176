//! Progress events streamed to the submitting client
//!
//! Wire shapes (JSON, camelCase):
//! - per record: `{progress, total, status, skuCode, error?}`
//! - summary: `{done: true, total, inserted, skipped, errors, dropped}`
//! - fatal: `{done: true, error}`

use serde::Serialize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Outcome class of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Inserted,
    Skipped,
    Error,
}

/// A record that failed to write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordError {
    pub sku_code: String,
    pub error: String,
}

/// Final classification of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Records handed to the writer (input rows minus dropped)
    pub total: usize,
    pub inserted: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<RecordError>,
    /// Rows rejected for a missing SKU code
    pub dropped: usize,
}

/// Event pushed through the progress channel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProgressEvent {
    #[serde(rename_all = "camelCase")]
    Record {
        /// 1-based position of the record
        progress: usize,
        total: usize,
        status: RecordStatus,
        sku_code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Completed {
        done: bool,
        #[serde(flatten)]
        summary: BatchSummary,
    },
    Failed {
        done: bool,
        error: String,
    },
}

impl ProgressEvent {
    pub fn completed(summary: BatchSummary) -> Self {
        ProgressEvent::Completed { done: true, summary }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ProgressEvent::Failed {
            done: true,
            error: error.into(),
        }
    }

    /// True for the summary and fatal events
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEvent::Record { .. })
    }
}

/// Producer side of the progress channel
///
/// Sends never block and never fail from the producer's point of view; a
/// client that went away simply stops receiving.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: UnboundedSender<ProgressEvent>,
}

impl ProgressSender {
    pub fn emit(&self, event: ProgressEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Progress receiver dropped; event discarded");
        }
    }
}

/// Create a connected progress channel
pub fn progress_channel() -> (ProgressSender, UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    (ProgressSender { tx }, rx)
}
