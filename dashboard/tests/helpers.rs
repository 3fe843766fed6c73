//! Test helper utilities for dashboard integration tests

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tower::ServiceExt;

use dashboard::{Dashboard, DashboardConfig, DataSourceConfig, DirectoryDataSource};

/// Config reading from `root`, bound to an ephemeral port, with fast upload ticks
pub fn create_test_config(root: &Path) -> DashboardConfig {
    let bind_address: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let mut config = DashboardConfig::new(
        bind_address,
        DataSourceConfig::Directory {
            root: root.to_path_buf(),
        },
    );
    config.uploads.tick_interval = Duration::from_millis(10);
    config.uploads.seed = Some(7);
    config
}

pub fn create_test_dashboard(root: &Path) -> Dashboard<DirectoryDataSource> {
    Dashboard::new(create_test_config(root), DirectoryDataSource::new(root))
}

/// Send one request through the router and decode the JSON body
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

/// Helper to wait for async conditions with timeout
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
