//! Shared helpers for integration tests

use now_client::Client;
use std::fs;
use std::path::Path;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Write `content` at `rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Authenticated client pointed at a mock server.
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .token(TEST_TOKEN)
        .build()
        .unwrap()
}
