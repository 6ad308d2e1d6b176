//! Bulk SKU submission pipeline
//!
//! - [`normalize`]: raw row → [`SkuRecord`]
//! - [`writer`]: one record's multi-table write
//! - [`orchestrator`]: batch loop, commit policy, backfill
//! - [`events`]: progress channel and wire events

pub mod events;
pub mod normalize;
pub mod orchestrator;
pub mod writer;

pub use events::{progress_channel, BatchSummary, ProgressEvent, ProgressSender, RecordStatus};
pub use normalize::{normalize_row, normalize_rows, SkuRecord};
pub use orchestrator::{BatchError, BatchOrchestrator, BatchRequest};
