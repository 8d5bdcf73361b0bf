//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use codegate::domain::models::Config;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Split a mockito `host:port` pair
pub fn host_and_port(host_with_port: &str) -> (String, u16) {
    let (host, port) = host_with_port
        .rsplit_once(':')
        .expect("mock server address has a port");
    (host.to_string(), port.parse().expect("numeric port"))
}

/// Config pointing every model call at a mock server, with the reachability
/// probe aimed at the same listener and outputs under `root`
pub fn config_for_server(server: &mockito::ServerGuard, root: &Path, native_client: bool) -> Config {
    let (host, port) = host_and_port(&server.host_with_port());
    let mut config = Config::default();
    config.model.base_url = server.url();
    config.model.probe_host = host;
    config.model.probe_port = port;
    config.model.request_timeout_secs = 5;
    config.model.native_client = native_client;
    config.output.deploy_dir = root.join("deployed");
    config.output.audit_dir = root.join("audit");
    config.logging.log_dir = None;
    config
}

/// A local port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

/// A local listener that accepts connections and never answers them.
/// Returns its port; the listener lives until the test runtime shuts down.
pub async fn silent_listener_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    port
}

pub fn chat_reply(content: &str) -> String {
    serde_json::json!({
        "model": "gpt-oss:latest",
        "message": { "role": "assistant", "content": content },
        "done": true
    })
    .to_string()
}
