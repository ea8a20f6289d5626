//! Structured decomposition of a `User-Agent` header.

use serde::{Deserialize, Serialize};

/// Sentinel used for any component the parser could not determine.
pub const UNKNOWN: &str = "unknown";

/// Browser, version, operating system, and platform class of a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUserAgent {
    pub browser: String,
    pub version: String,
    pub os: String,
    /// `desktop`, `mobile`, `tablet`, `bot`, or `unknown`.
    pub platform: String,
}

impl Default for ParsedUserAgent {
    fn default() -> Self {
        Self {
            browser: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
            platform: UNKNOWN.to_string(),
        }
    }
}
