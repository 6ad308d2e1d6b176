//! Bulk submission with streamed progress
//!
//! Two entry points feed the same pipeline:
//! - `POST /submit-skus` with a JSON body
//! - `GET /submit-skus-stream?payload=<JSON>` for `EventSource` clients
//!
//! The batch runs in a background task and keeps running if the client
//! disconnects.

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::Value;
use std::convert::Infallible;

use crate::bulk::{progress_channel, BatchOrchestrator, BatchRequest};
use crate::sheet::RawRow;
use crate::{ApiError, ApiResult, AppState};

/// Submission payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub vendor_code: String,
    #[serde(default)]
    pub created_by: Option<String>,
    pub skus: Vec<RawRow>,
}

impl SubmitRequest {
    fn parse(body: Value) -> ApiResult<Self> {
        if !body.get("skus").is_some_and(Value::is_array) {
            return Err(ApiError::BadRequest(
                "Invalid data format. 'skus' must be an array".to_string(),
            ));
        }

        let request: SubmitRequest = serde_json::from_value(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid data format: {}", e)))?;

        if request.vendor_code.trim().is_empty() {
            return Err(ApiError::BadRequest("vendorCode is required".to_string()));
        }

        Ok(request)
    }

    fn into_batch(self) -> BatchRequest {
        BatchRequest {
            vendor_code: self.vendor_code,
            created_by: self.created_by,
            rows: self.skus,
        }
    }
}

/// Query string of the `EventSource` entry point
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub payload: String,
}

/// POST /submit-skus
pub async fn submit_skus(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let request = SubmitRequest::parse(body)?;
    Ok(start_batch(&state, request.into_batch()))
}

/// GET /submit-skus-stream?payload=
pub async fn submit_skus_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let body: Value = serde_json::from_str(&query.payload)
        .map_err(|e| ApiError::BadRequest(format!("payload is not valid JSON: {}", e)))?;
    let request = SubmitRequest::parse(body)?;
    Ok(start_batch(&state, request.into_batch()))
}

fn start_batch(
    state: &AppState,
    request: BatchRequest,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (sender, rx) = progress_channel();
    let orchestrator = BatchOrchestrator::new(state.db.clone(), state.settings.clone());

    tokio::spawn(async move {
        // Outcome is logged and streamed by the orchestrator
        let _ = orchestrator.run(request, &sender).await;
    });

    skureg_common::sse::channel_sse_stream("submit-skus", rx)
}

/// Submission routes; batches carry no row-count limit, so neither does the body
pub fn submit_routes() -> Router<AppState> {
    Router::new()
        .route("/submit-skus", post(submit_skus))
        .route("/submit-skus-stream", get(submit_skus_stream))
        .layer(DefaultBodyLimit::disable())
}
