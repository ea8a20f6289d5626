//! Response DTOs.

use serde::{Deserialize, Serialize};

use pixeltrace_core::types::TrackRecord;

/// Body of `GET /view-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDataResponse {
    /// Fixed disclaimer.
    pub message: String,
    /// Number of stored records.
    pub total_tracks: usize,
    /// Records in arrival order.
    pub data: Vec<TrackRecord>,
}

impl ViewDataResponse {
    pub fn new(message: impl Into<String>, data: Vec<TrackRecord>) -> Self {
        Self {
            message: message.into(),
            total_tracks: data.len(),
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
