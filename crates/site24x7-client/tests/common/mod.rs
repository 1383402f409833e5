//! Common test utilities for client contract tests
//!
//! The Site24x7 API is stood in for by a `wiremock` server; these helpers
//! build its response bodies and client configs pointing at it.

#![allow(dead_code)]

use serde_json::{Value, json};
use site24x7_core::config::{AuthConfig, ClientConfig, RetryConfig};
use wiremock::{MockServer, ResponseTemplate};

/// Success response wrapped in the `{"data": ...}` envelope
pub fn data(status: u16, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(json!({"code": 0, "message": "success", "data": data}))
}

/// Error response in the API's error shape
pub fn api_error(status: u16, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"error_code": code, "message": message}))
}

/// Accounts server answer carrying `access_token`
pub fn access_token(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": value,
        "expires_in": 3600,
        "api_domain": "https://www.zohoapis.com",
        "token_type": "Bearer",
    }))
}

/// Monitor group as the API returns it
pub fn group(id: &str) -> Value {
    json!({"group_id": id, "display_name": "web", "description": "frontends"})
}

/// Config pointing at `server` with a static token and instant retries
pub fn token_config(server: &MockServer, max_retries: u32) -> ClientConfig {
    ClientConfig::new(AuthConfig::Token {
        auth_token: "test-token".to_string(),
    })
    .with_base_url(format!("{}/api", server.uri()))
    .with_retry(instant_retry(max_retries))
}

/// Config pointing at `server` for both API and token requests
pub fn oauth_config(server: &MockServer, max_retries: u32) -> ClientConfig {
    ClientConfig::new(AuthConfig::OAuth {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        refresh_token: "refresh-token".to_string(),
        accounts_url: server.uri(),
    })
    .with_base_url(format!("{}/api", server.uri()))
    .with_retry(instant_retry(max_retries))
}

pub fn instant_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        min_wait_secs: 0,
        max_wait_secs: 0,
        max_retries,
    }
}

/// Number of requests the server has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}
