//! # pixeltrace-api
//!
//! HTTP layer for PixelTrace built on Axum.
//!
//! Serves the tracking pixel, the fingerprint script and its collection
//! endpoint, the record inspection/clear endpoints, and the landing page.

pub mod app;
pub mod assets;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
