//! Sample SKU sheet download

use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::sheet::{build_sample_template, SAMPLE_FILE_NAME};
use crate::{ApiError, ApiResult, AppState};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /download-sample-sku
pub async fn download_sample_sku() -> ApiResult<Response> {
    let bytes = build_sample_template().map_err(|e| {
        tracing::error!("Error generating sample SKU sheet: {}", e);
        ApiError::Internal("Could not generate sample file".to_string())
    })?;

    let disposition = format!("attachment; filename={}", SAMPLE_FILE_NAME);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

pub fn template_routes() -> Router<AppState> {
    Router::new().route("/download-sample-sku", get(download_sample_sku))
}
