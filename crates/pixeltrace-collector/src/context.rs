//! Client metadata observed on an incoming request.

use pixeltrace_core::types::HeaderSnapshot;

/// What the transport and headers disclose about the requesting client.
///
/// Built by the HTTP layer and handed to the collector so that record
/// construction stays independent of the web framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    /// First `X-Forwarded-For` hop, else the peer address, else `"unknown"`.
    pub ip: String,
    /// Raw `User-Agent` header.
    pub user_agent: Option<String>,
    /// `Referer` header.
    pub referer: Option<String>,
    /// Fixed set of copied headers.
    pub headers: HeaderSnapshot,
}

impl ClientContext {
    /// Resolves the client address from a forwarded-for header value and
    /// the transport peer.
    pub fn resolve_ip(forwarded_for: Option<&str>, peer: Option<String>) -> String {
        forwarded_for
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .or(peer)
            .unwrap_or_else(|| "unknown".to_string())
    }
}
