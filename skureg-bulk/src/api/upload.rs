//! Spreadsheet upload and preview (nothing is persisted)

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::bulk::normalize_rows;
use crate::sheet::{read_rows, RawRow, SheetFormat};
use crate::{ApiError, ApiResult, AppState};

/// Multipart field carrying the sheet
pub const UPLOAD_FIELD: &str = "skuFile";

/// POST /upload-sku response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub success: bool,
    /// Parsed rows, in sheet order, for the client to review and submit
    pub preview: Vec<RawRow>,
    pub rows: usize,
    /// Rows that a submission would drop for lacking a SKU Code
    pub missing_sku_code: usize,
}

/// POST /upload-sku
///
/// Accepts `.xlsx`/`.xls`/`.ods`/`.csv` in the `skuFile` field and returns
/// the first sheet as row mappings.
pub async fn upload_sku(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PreviewResponse>> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            let format = SheetFormat::from_file_name(field.file_name());
            let bytes = field.bytes().await?;
            upload = Some((format, bytes.to_vec()));
            break;
        }
    }

    let (format, bytes) = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("No file uploaded (expected field '{}')", UPLOAD_FIELD))
    })?;

    let size = bytes.len();
    let rows = tokio::task::spawn_blocking(move || read_rows(bytes, format))
        .await
        .map_err(|e| ApiError::Internal(format!("Sheet parser task failed: {}", e)))?
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (_, missing_sku_code) = normalize_rows(&rows);

    tracing::info!(
        bytes = size,
        format = ?format,
        rows = rows.len(),
        missing_sku_code,
        "SKU sheet parsed for preview"
    );

    Ok(Json(PreviewResponse {
        success: true,
        rows: rows.len(),
        missing_sku_code,
        preview: rows,
    }))
}

/// Upload routes; `max_bytes` caps the multipart body
pub fn upload_routes(max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload-sku", post(upload_sku))
        .layer(DefaultBodyLimit::max(max_bytes))
}
