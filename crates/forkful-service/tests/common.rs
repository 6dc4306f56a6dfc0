//! Common test utilities for forkful integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use forkful_core::UserId;
use forkful_service::{create_router, AppState, ServiceConfig};
use forkful_store::{MemoryStorage, Storage};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct storage handle for seeding state the API has no route for.
    pub storage: Arc<MemoryStorage>,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory store.
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&storage) as Arc<dyn Storage>, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, storage }
    }

    /// Register a user through the API and return its id.
    pub async fn register_user(&self, username: &str) -> UserId {
        let response = self
            .server
            .post("/api/users")
            .json(&serde_json::json!({
                "username": username,
                "password": "hunter2",
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        UserId::from_raw(body["id"].as_i64().expect("user id"))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
