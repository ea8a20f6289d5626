//! Pixel hit → [`PixelRecord`].

use std::collections::HashMap;

use pixeltrace_core::config::collector::CollectorConfig;
use pixeltrace_core::types::user_agent::UNKNOWN;
use pixeltrace_core::types::{GeoLocation, InferredFields, ParsedUserAgent, PixelRecord};

use crate::context::ClientContext;
use crate::record::inferred::{primary_language, server_timezone};

/// Query parameters accepted on the pixel URL.
///
/// `screen` and `depth` can only be filled by script running in the page;
/// a plain `<img>` request never carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelHit {
    pub uid: Option<String>,
    pub screen: Option<String>,
    pub depth: Option<String>,
}

impl PixelHit {
    /// Picks the known parameters out of a decoded query string. Unknown
    /// parameters are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            uid: params.get("uid").cloned(),
            screen: params.get("screen").cloned(),
            depth: params.get("depth").cloned(),
        }
    }

    /// Assembles the record, filling every absent value with its default.
    pub fn into_record(
        self,
        client: ClientContext,
        parsed_ua: ParsedUserAgent,
        geolocation: Option<GeoLocation>,
        defaults: &CollectorConfig,
        timestamp: String,
    ) -> PixelRecord {
        let language = primary_language(client.headers.accept_language.as_deref());

        PixelRecord {
            uid: non_empty(self.uid).unwrap_or_else(|| defaults.default_uid.clone()),
            timestamp,
            ip: client.ip,
            user_agent: non_empty(client.user_agent).unwrap_or_else(|| UNKNOWN.to_string()),
            parsed_ua,
            geolocation,
            headers: client.headers,
            referer: non_empty(client.referer).unwrap_or_else(|| defaults.default_referer.clone()),
            inferred: InferredFields {
                language,
                timezone: server_timezone(),
                screen_size: non_empty(self.screen).unwrap_or_else(|| UNKNOWN.to_string()),
                color_depth: non_empty(self.depth).unwrap_or_else(|| UNKNOWN.to_string()),
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
