//! `ClientInfo` extractor. Pulls the client address and the tracked
//! headers out of the request.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use pixeltrace_collector::ClientContext;
use pixeltrace_core::types::HeaderSnapshot;

/// Client metadata available in handlers. Never rejects: every missing
/// piece is simply absent.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientContext);

impl ClientInfo {
    /// Returns the inner `ClientContext`.
    pub fn into_inner(self) -> ClientContext {
        self.0
    }
}

impl std::ops::Deref for ClientInfo {
    type Target = ClientContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        // Absent when the router is driven without a socket (tests, oneshot).
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_canonical().to_string());

        let ip = ClientContext::resolve_ip(
            headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()),
            peer,
        );

        Ok(Self(ClientContext {
            ip,
            user_agent: header(headers, "user-agent"),
            referer: header(headers, "referer").or_else(|| header(headers, "referrer")),
            headers: HeaderSnapshot {
                accept: header(headers, "accept"),
                accept_language: header(headers, "accept-language"),
                accept_encoding: header(headers, "accept-encoding"),
                connection: header(headers, "connection"),
                dnt: header(headers, "dnt"),
                sec_ch_ua: header(headers, "sec-ch-ua"),
                sec_ch_ua_mobile: header(headers, "sec-ch-ua-mobile"),
                sec_ch_ua_platform: header(headers, "sec-ch-ua-platform"),
            },
        }))
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
