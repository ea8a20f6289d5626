//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bytes::Bytes;

use pixeltrace_collector::CollectorService;
use pixeltrace_core::result::AppResult;

use crate::assets;

/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record collection service
    pub collector: Arc<CollectorService>,
    /// Decoded tracking pixel
    pub pixel: Bytes,
}

impl AppState {
    pub fn new(collector: Arc<CollectorService>) -> AppResult<Self> {
        Ok(Self {
            collector,
            pixel: assets::transparent_pixel()?,
        })
    }
}
