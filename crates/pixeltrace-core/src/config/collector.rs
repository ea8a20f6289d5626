//! Record collection configuration.

use serde::{Deserialize, Serialize};

/// Where pixel hits are logged and which sentinels fill absent fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Path of the append-only JSON-lines log file.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// `uid` recorded when the pixel request carries none.
    #[serde(default = "default_uid")]
    pub default_uid: String,
    /// `referer` recorded when the request carries no referer header.
    #[serde(default = "default_referer")]
    pub default_referer: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            default_uid: default_uid(),
            default_referer: default_referer(),
        }
    }
}

fn default_log_file() -> String {
    "tracking_log.jsonl".to_string()
}

fn default_uid() -> String {
    "none".to_string()
}

fn default_referer() -> String {
    "direct".to_string()
}
