//! Tracking records kept by the collector.
//!
//! Two shapes exist: [`PixelRecord`] built from what an image request
//! discloses, and [`FingerprintRecord`] built from attributes a browser
//! script posts. Both carry `uid` and `timestamp`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geo::GeoLocation;
use super::user_agent::ParsedUserAgent;

/// `uid` stored on a fingerprint whose payload has no usable one.
pub const UNKNOWN_UID: &str = "unknown";

/// Keys the server owns on a fingerprint record; client values are dropped.
const RESERVED_KEYS: [&str; 4] = ["type", "uid", "ip", "timestamp"];

/// Formats a timestamp as ISO-8601 with millisecond precision and `Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single stored record, tagged with `"type": "pixel" | "fingerprint"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TrackRecord {
    Pixel(PixelRecord),
    Fingerprint(FingerprintRecord),
}

impl TrackRecord {
    pub fn uid(&self) -> &str {
        match self {
            Self::Pixel(r) => &r.uid,
            Self::Fingerprint(r) => &r.uid,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::Pixel(r) => &r.timestamp,
            Self::Fingerprint(r) => &r.timestamp,
        }
    }

    pub fn ip(&self) -> &str {
        match self {
            Self::Pixel(r) => &r.ip,
            Self::Fingerprint(r) => &r.ip,
        }
    }
}

impl From<PixelRecord> for TrackRecord {
    fn from(record: PixelRecord) -> Self {
        Self::Pixel(record)
    }
}

impl From<FingerprintRecord> for TrackRecord {
    fn from(record: FingerprintRecord) -> Self {
        Self::Fingerprint(record)
    }
}

/// Metadata observed on a tracking pixel request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelRecord {
    pub uid: String,
    pub timestamp: String,
    pub ip: String,
    /// Raw `User-Agent` header.
    pub user_agent: String,
    #[serde(rename = "parsedUA")]
    pub parsed_ua: ParsedUserAgent,
    /// `None` when the lookup resolved nothing; serialized as `null`.
    pub geolocation: Option<GeoLocation>,
    pub headers: HeaderSnapshot,
    pub referer: String,
    pub inferred: InferredFields,
}

/// Fixed set of request headers copied onto a pixel record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sec_ch_ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sec_ch_ua_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sec_ch_ua_platform: Option<String>,
}

/// Values derived from headers, server state, and query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredFields {
    /// Primary tag of `Accept-Language`.
    pub language: String,
    /// Server timezone at the time of the request.
    pub timezone: String,
    /// Only present when a script appended `screen` to the pixel URL.
    pub screen_size: String,
    /// Only present when a script appended `depth` to the pixel URL.
    pub color_depth: String,
}

/// Browser-declared attributes merged with server observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub uid: String,
    pub ip: String,
    pub timestamp: String,
    /// Everything else the client posted, as-is.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FingerprintRecord {
    /// Merges a posted payload with the server-observed address and time.
    ///
    /// Server fields override same-named client keys. A string or scalar
    /// `uid` in the payload is kept; anything else becomes `"unknown"`.
    pub fn from_payload(mut payload: Map<String, Value>, ip: String, timestamp: String) -> Self {
        let uid = match payload.remove("uid") {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => UNKNOWN_UID.to_string(),
        };

        for key in RESERVED_KEYS {
            payload.remove(key);
        }

        Self {
            uid,
            ip,
            timestamp,
            attributes: payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_pixel() -> PixelRecord {
        PixelRecord {
            uid: "abc123".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            ip: "203.0.113.9".to_string(),
            user_agent: "curl/8.0".to_string(),
            parsed_ua: ParsedUserAgent::default(),
            geolocation: None,
            headers: HeaderSnapshot {
                accept_language: Some("en-US".to_string()),
                ..Default::default()
            },
            referer: "direct".to_string(),
            inferred: InferredFields {
                language: "en-US".to_string(),
                timezone: "UTC".to_string(),
                screen_size: "unknown".to_string(),
                color_depth: "unknown".to_string(),
            },
        }
    }

    #[test]
    fn test_iso_timestamp_millis_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-06T07:08:09.000Z");
    }

    #[test]
    fn test_pixel_serializes_camel_case_with_tag() {
        let value = serde_json::to_value(TrackRecord::from(sample_pixel())).unwrap();
        assert_eq!(value["type"], "pixel");
        assert_eq!(value["userAgent"], "curl/8.0");
        assert_eq!(value["parsedUA"]["browser"], "unknown");
        assert_eq!(value["headers"]["acceptLanguage"], "en-US");
        assert!(value["headers"].get("dnt").is_none());
        assert!(value["geolocation"].is_null());
        assert_eq!(value["inferred"]["screenSize"], "unknown");
        assert_eq!(value["inferred"]["colorDepth"], "unknown");
    }

    #[test]
    fn test_fingerprint_server_fields_override_client() {
        let payload = json!({
            "uid": "u-1",
            "ip": "1.1.1.1",
            "timestamp": "yesterday",
            "type": "pixel",
            "screen": { "width": 1920, "height": 1080 },
        });
        let Value::Object(map) = payload else {
            unreachable!()
        };

        let record = FingerprintRecord::from_payload(
            map,
            "198.51.100.4".to_string(),
            "2024-01-01T00:00:00.000Z".to_string(),
        );
        let value = serde_json::to_value(TrackRecord::from(record)).unwrap();

        assert_eq!(value["type"], "fingerprint");
        assert_eq!(value["uid"], "u-1");
        assert_eq!(value["ip"], "198.51.100.4");
        assert_eq!(value["timestamp"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["screen"]["width"], 1920);
    }

    #[test]
    fn test_fingerprint_without_uid_gets_unknown() {
        let record =
            FingerprintRecord::from_payload(Map::new(), "ip".to_string(), "ts".to_string());
        assert_eq!(record.uid, UNKNOWN_UID);
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_fingerprint_numeric_uid_kept_as_string() {
        let mut map = Map::new();
        map.insert("uid".to_string(), json!(42));
        let record = FingerprintRecord::from_payload(map, "ip".to_string(), "ts".to_string());
        assert_eq!(record.uid, "42");
    }

    #[test]
    fn test_accessors_cover_both_variants() {
        let pixel = TrackRecord::from(sample_pixel());
        assert_eq!(pixel.uid(), "abc123");
        assert_eq!(pixel.ip(), "203.0.113.9");

        let fp = TrackRecord::from(FingerprintRecord::from_payload(
            Map::new(),
            "10.0.0.1".to_string(),
            "ts".to_string(),
        ));
        assert_eq!(fp.uid(), UNKNOWN_UID);
        assert_eq!(fp.timestamp(), "ts");
    }
}
