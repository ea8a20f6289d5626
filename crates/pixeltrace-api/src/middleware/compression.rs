//! Response compression.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::{And, NotForContentType, Predicate, SizeAbove};

/// Bodies smaller than this go out uncompressed.
pub const MIN_COMPRESS_BYTES: u16 = 256;

type TrackingPredicate = And<SizeAbove, NotForContentType>;

/// Gzip for the script, the landing page, and `/view-data` dumps. Images
/// (the pixel) are never compressed.
pub fn build_compression_layer() -> CompressionLayer<TrackingPredicate> {
    CompressionLayer::new()
        .gzip(true)
        .compress_when(SizeAbove::new(MIN_COMPRESS_BYTES).and(NotForContentType::IMAGES))
}
