//! Per-request tracing.
//!
//! Every request gets an `http` span carrying the method, path, and the
//! visitor `uid` when the query string has one, so log lines emitted while
//! recording a hit can be tied back to the embed that caused it.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{Request, Uri};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultOnResponse, HttpMakeClassifier, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Span factory for [`build_trace_layer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingSpan;

impl<B> MakeSpan<B> for TrackingSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let span = tracing::info_span!(
            "http",
            method = %request.method(),
            path = %request.uri().path(),
            uid = tracing::field::Empty,
        );
        if let Some(uid) = tracking_uid(request.uri()) {
            span.record("uid", uid.as_str());
        }
        span
    }
}

/// Request tracing with one INFO line per response (status and latency in ms).
pub fn build_trace_layer() -> TraceLayer<HttpMakeClassifier, TrackingSpan> {
    TraceLayer::new_for_http()
        .make_span_with(TrackingSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Non-empty `uid` query parameter, if any.
pub fn tracking_uid(uri: &Uri) -> Option<String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params
        .get("uid")
        .map(|uid| uid.trim())
        .filter(|uid| !uid.is_empty())
        .map(String::from)
}
