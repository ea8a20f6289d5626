//! Fingerprint collection handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value};

use crate::extractors::ClientInfo;
use crate::state::AppState;

/// POST /collect-fingerprint
///
/// Anything that is not a JSON object is rejected by the `Json` extractor
/// before this runs.
pub async fn collect_fingerprint(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(payload): Json<Map<String, Value>>,
) -> &'static str {
    state
        .collector
        .record_fingerprint(payload, client.into_inner().ip)
        .await;
    "OK"
}
