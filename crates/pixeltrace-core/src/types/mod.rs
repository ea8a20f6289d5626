//! Shared value types: tracking records and lookup results.

pub mod geo;
pub mod record;
pub mod user_agent;

pub use geo::GeoLocation;
pub use record::{
    FingerprintRecord, HeaderSnapshot, InferredFields, PixelRecord, TrackRecord, iso_timestamp,
};
pub use user_agent::ParsedUserAgent;
