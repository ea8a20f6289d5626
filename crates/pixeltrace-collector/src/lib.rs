//! # pixeltrace-collector
//!
//! Collection logic for PixelTrace: turns observed request metadata into
//! tracking records, keeps them in an ordered in-memory store, and mirrors
//! pixel hits into an append-only JSON-lines log.
//!
//! External lookups (user-agent decomposition, IP geolocation) sit behind
//! traits and never fail: anything they cannot resolve comes back as a
//! default or `None`.

pub mod context;
pub mod log;
pub mod lookup;
pub mod record;
pub mod service;
pub mod store;

pub use context::ClientContext;
pub use log::TrackLog;
pub use lookup::{
    BuiltinUserAgentParser, DisabledGeoLocator, GeoLocator, HttpGeoLocator, UserAgentParser,
};
pub use record::PixelHit;
pub use service::CollectorService;
pub use store::TrackStore;
