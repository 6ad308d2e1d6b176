//! Single-SKU lookup and deletion

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    routing::get,
    Json, Router,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{error, info};

use crate::db::skus::{delete_sku as delete_sku_row, find_sku_info, SkuInfo};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuInfoQuery {
    pub sku_code: String,
}

/// GET /get-sku-info response; `sku` is null for unknown codes
#[derive(Debug, Serialize)]
pub struct SkuInfoResponse {
    pub sku: Option<SkuInfo>,
}

/// Terminal event of a delete stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeleteEvent {
    Deleted {
        done: bool,
        deleted: String,
    },
    NotFound {
        done: bool,
        #[serde(rename = "notFound")]
        not_found: String,
    },
    Failed {
        done: bool,
        error: String,
    },
}

/// GET /get-sku-info?skuCode=
pub async fn get_sku_info(
    State(state): State<AppState>,
    Query(query): Query<SkuInfoQuery>,
) -> ApiResult<Json<SkuInfoResponse>> {
    let sku_code = query.sku_code.trim();
    if sku_code.is_empty() {
        return Err(ApiError::BadRequest("skuCode is required".to_string()));
    }

    let sku = find_sku_info(&state.db, sku_code).await?;
    Ok(Json(SkuInfoResponse { sku }))
}

/// GET /delete-sku/:sku_code
///
/// Streams exactly one terminal event.
pub async fn delete_sku(
    State(state): State<AppState>,
    Path(sku_code): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let db = state.db.clone();

    tokio::spawn(async move {
        let sku_code = sku_code.trim().to_string();
        let event = match delete_sku_row(&db, &sku_code).await {
            Ok(true) => {
                info!(sku_code = %sku_code, "SKU deleted");
                DeleteEvent::Deleted {
                    done: true,
                    deleted: sku_code,
                }
            }
            Ok(false) => {
                info!(sku_code = %sku_code, "SKU not found for delete");
                DeleteEvent::NotFound {
                    done: true,
                    not_found: sku_code,
                }
            }
            Err(e) => {
                error!(sku_code = %sku_code, error = %e, "SKU delete failed");
                DeleteEvent::Failed {
                    done: true,
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(event);
    });

    skureg_common::sse::channel_sse_stream("delete-sku", rx)
}

pub fn sku_routes() -> Router<AppState> {
    Router::new()
        .route("/get-sku-info", get(get_sku_info))
        .route("/delete-sku/:sku_code", get(delete_sku))
}
