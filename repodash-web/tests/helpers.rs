//! Integration test helpers
//!
//! Spawns the full application on a random port, pointed at a mock GitHub API.

use repodash_core::{NoCredentials, RepodashConfig};
use repodash_web::{create_app, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.get(path).await;
        let status = response.status();
        let body = response.json().await.expect("Response is not JSON");
        (status, body)
    }
}

pub async fn spawn_app(upstream: &MockServer) -> TestApp {
    let mut config = RepodashConfig::default();
    config.github.base_url = upstream.uri();

    let state = AppState::new(config, Arc::new(NoCredentials)).expect("Failed to build state");
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        api_client: reqwest::Client::new(),
    }
}
