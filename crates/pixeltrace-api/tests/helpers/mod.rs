//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pixeltrace_api::{AppState, build_app};
use pixeltrace_collector::CollectorService;
use pixeltrace_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Location of the tracking log
    pub log_path: PathBuf,
    /// Keeps the log directory alive for the duration of the test
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application with its log in a fresh directory
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().join("tracking_log.jsonl");
        Self::build(dir, log_path).await
    }

    /// Create a test application writing its tracking log to `log_path`
    pub async fn with_log_file(log_path: impl Into<PathBuf>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self::build(dir, log_path.into()).await
    }

    async fn build(dir: TempDir, log_path: PathBuf) -> Self {
        let mut config = AppConfig::default();
        config.collector.log_file = log_path.to_string_lossy().into_owned();

        let collector = CollectorService::from_config(&config)
            .await
            .expect("Failed to init collector");
        let state = AppState::new(Arc::new(collector)).expect("Failed to build state");

        let router = build_app(state, &config.server.cors);

        Self {
            router,
            log_path,
            _dir: dir,
        }
    }

    /// GET without extra headers
    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_with_headers(path, &[]).await
    }

    /// GET with the given request headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// POST a JSON document
    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let body = serde_json::to_string(&body).expect("Failed to serialize body");
        self.post_raw(path, "application/json", body).await
    }

    /// POST an arbitrary body with the given content type
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(body.into())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Fetch `/view-data` and return the parsed body
    pub async fn view_data(&self) -> Value {
        let response = self.get("/view-data").await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()
    }

    /// Lines currently in the tracking log, parsed
    pub fn log_lines(&self) -> Vec<Value> {
        std::fs::read_to_string(&self.log_path)
            .expect("Failed to read tracking log")
            .lines()
            .map(|line| serde_json::from_str(line).expect("Log line is not JSON"))
            .collect()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Bytes,
}

impl TestResponse {
    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("Body is not UTF-8")
    }
}
