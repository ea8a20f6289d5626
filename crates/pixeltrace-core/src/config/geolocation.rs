//! IP geolocation lookup configuration.

use serde::{Deserialize, Serialize};

/// Geolocation lookup settings. Disabled by default, in which case every
/// record carries `geolocation: null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Whether to query the lookup endpoint at all.
    #[serde(default)]
    pub enabled: bool,
    /// Lookup URL template; `{ip}` is replaced with the client address.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-lookup timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "http://ip-api.com/json/{ip}".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}
