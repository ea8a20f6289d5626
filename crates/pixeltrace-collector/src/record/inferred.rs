//! Derived values stored under `inferred` on a pixel record.

use chrono::Local;

use pixeltrace_core::types::user_agent::UNKNOWN;

/// Primary language tag of an `Accept-Language` value.
///
/// `"en-US,en;q=0.9"` yields `"en-US"`; a missing or empty header yields
/// `"unknown"`.
pub fn primary_language(accept_language: Option<&str>) -> String {
    accept_language
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "*")
        .map(String::from)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Timezone of the server process: `TZ` when set, else the current UTC
/// offset (e.g. `+02:00`).
pub fn server_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| Local::now().offset().to_string())
}
