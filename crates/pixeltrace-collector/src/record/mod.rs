//! Construction of tracking records from observed request data.

pub mod inferred;
pub mod pixel;

pub use inferred::{primary_language, server_timezone};
pub use pixel::PixelHit;
