//! Tracking pixel handler.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use pixeltrace_collector::PixelHit;

use crate::error::ApiError;
use crate::extractors::ClientInfo;
use crate::state::AppState;

/// Headers that keep every embed re-fetching the pixel.
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// GET /pixel.png
pub async fn pixel(
    State(state): State<AppState>,
    client: ClientInfo,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .collector
        .record_pixel(PixelHit::from_params(&params), client.into_inner())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, NO_CACHE),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        state.pixel.clone(),
    ))
}
