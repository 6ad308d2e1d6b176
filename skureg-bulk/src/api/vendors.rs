//! Vendor lookup

use axum::{extract::State, routing::get, Json, Router};

use crate::db::vendors::{list_vendors, Vendor};
use crate::{ApiResult, AppState};

/// GET /vendors
///
/// Known vendors as `[{code, name, category}]`, ordered by code.
pub async fn get_vendors(State(state): State<AppState>) -> ApiResult<Json<Vec<Vendor>>> {
    let vendors = list_vendors(&state.db).await?;
    Ok(Json(vendors))
}

pub fn vendor_routes() -> Router<AppState> {
    Router::new().route("/vendors", get(get_vendors))
}
