//! Route definitions for the PixelTrace HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(page_routes())
        .merge(tracking_routes())
        .merge(data_routes())
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Landing page and the fingerprint script
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::landing::index))
        .route("/fingerprint.js", get(handlers::script::fingerprint_script))
}

/// Endpoints that record visitors
fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/pixel.png", get(handlers::pixel::pixel))
        .route(
            "/collect-fingerprint",
            post(handlers::collect::collect_fingerprint),
        )
}

/// Inspection and reset of recorded data
fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/view-data", get(handlers::data::view_data))
        .route("/clear-data", get(handlers::data::clear_data))
}
