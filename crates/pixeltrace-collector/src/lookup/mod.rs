//! Request metadata lookups.
//!
//! Both lookups are infallible at the boundary: implementations swallow
//! their own errors and report "nothing found".

pub mod geo;
pub mod user_agent;

pub use geo::{DisabledGeoLocator, GeoLocator, HttpGeoLocator};
pub use user_agent::{BuiltinUserAgentParser, UserAgentParser};
