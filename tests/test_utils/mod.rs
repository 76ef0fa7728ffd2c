//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};

use spark_proxy::api::AppState;
use spark_proxy::api::app;
use spark_proxy::core::AppConfig;
use spark_proxy::spark::AuthScheme;

/// Path the mocked upstream serves chat completions on
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Builds a fully configured `AppConfig` pointing at `api_hostname`.
pub fn test_config(api_hostname: &str) -> AppConfig {
    AppConfig {
        app_id: Some(String::from("test-app-id")),
        api_key: Some(String::from("test-key")),
        api_secret: Some(String::from("test-secret")),
        api_url: format!("{}{}", api_hostname.trim_end_matches('/'), COMPLETIONS_PATH),
        model: String::from("lite"),
        auth_scheme: AuthScheme::KeySecret,
    }
}

/// Creates a test application router from the given config.
pub fn test_app(config: AppConfig) -> Router {
    app(Arc::new(AppState::new(config)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).expect("Body is not JSON")
}
