//! Common test utilities for router tests
//!
//! Routers are built over in-memory stores, so these tests need no database.
//! Requests go through the full middleware stack via `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tasklist_api::app::{build_auth_router, build_tasks_router, AuthState, TasksState};
use tasklist_api::config::Config;
use tasklist_shared::auth::{password::HashParams, AuthService};
use tasklist_shared::models::memory::{MemoryTaskStore, MemoryUserStore};
use tasklist_shared::tasks::TaskService;
use tower::ServiceExt;

/// Cheap argon2 parameters so tests stay fast
pub const FAST_HASH: HashParams = HashParams {
    memory_kib: 4096,
    iterations: 1,
    parallelism: 1,
};

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgresql://unused/test".to_string()),
        _ => None,
    })
    .expect("test config should load")
}

/// Auth server over a fresh in-memory user store
pub struct AuthContext {
    pub app: Router,
    pub store: Arc<MemoryUserStore>,
}

impl AuthContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let auth = AuthService::with_params(store.clone(), FAST_HASH);
        let app = build_auth_router(AuthState::new(auth, test_config()));
        Self { app, store }
    }
}

/// Task server over a fresh in-memory task store
pub struct TasksContext {
    pub app: Router,
    pub store: Arc<MemoryTaskStore>,
}

impl TasksContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryTaskStore::new());
        let app = build_tasks_router(TasksState::new(TaskService::new(store.clone()), test_config()));
        Self { app, store }
    }
}

/// Sends a request and returns the status and parsed JSON body (`Null` if empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prebuilt request
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("Expected JSON body, got: {}", String::from_utf8_lossy(&bytes))
        })
    };

    (status, json)
}
