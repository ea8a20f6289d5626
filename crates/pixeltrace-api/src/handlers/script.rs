//! Fingerprint script handler.

use axum::http::header;
use axum::response::IntoResponse;

use crate::assets::FINGERPRINT_JS;

/// GET /fingerprint.js
pub async fn fingerprint_script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], FINGERPRINT_JS)
}
