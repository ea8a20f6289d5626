//! Static payloads served by the API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;

use pixeltrace_core::error::{AppError, ErrorKind};
use pixeltrace_core::result::AppResult;

/// Fully transparent 1×1 RGBA PNG (67 bytes once decoded).
pub const PIXEL_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAACklEQVR4nGMAAQAABQABDQottAAAAABJRU5ErkJggg==";

/// Script that gathers browser attributes and posts them to
/// `/collect-fingerprint`.
pub const FINGERPRINT_JS: &str = include_str!("../assets/fingerprint.js");

/// Landing page listing the endpoints.
pub const LANDING_HTML: &str = include_str!("../assets/index.html");

/// Disclaimer returned with `/view-data`.
pub const DISCLAIMER: &str = "Educational demonstration only. This data shows what a tracking \
     pixel can observe about a visitor. Do not use it to track people without their consent.";

/// Decodes the tracking pixel once, at startup.
pub fn transparent_pixel() -> AppResult<Bytes> {
    BASE64
        .decode(PIXEL_PNG_BASE64)
        .map(Bytes::from)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Invalid pixel constant", e))
}
