//! Inspection and reset of recorded data.

use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::assets::DISCLAIMER;
use crate::dto::response::ViewDataResponse;
use crate::state::AppState;

/// Confirmation body of `GET /clear-data`.
pub const CLEARED: &str = "All tracking data cleared";

/// GET /view-data
pub async fn view_data(State(state): State<AppState>) -> Json<ViewDataResponse> {
    let records = state.collector.records().await;
    Json(ViewDataResponse::new(DISCLAIMER, records))
}

/// GET /clear-data
pub async fn clear_data(State(state): State<AppState>) -> &'static str {
    let removed = state.collector.clear().await;
    info!(removed, "Tracking data cleared on request");
    CLEARED
}
