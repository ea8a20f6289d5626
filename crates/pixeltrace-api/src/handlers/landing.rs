//! Landing page handler.

use axum::response::Html;

use crate::assets::LANDING_HTML;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(LANDING_HTML)
}
