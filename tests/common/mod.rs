//! Common test utilities
//!
//! Spins up the application over the in-memory store with fixed token
//! settings, and provides helpers for registering users and uploading
//! receipts through the real HTTP surface.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use receiptshare::backend::server::config::JwtSettings;
use receiptshare::backend::store::MemoryStore;
use receiptshare::backend::create_app_with;

/// Token settings used by every integration test
pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-test-signing-key".to_string(),
        issuer: "receiptshare".to_string(),
        audience: "receiptshare".to_string(),
        access_token_minutes: 15,
    }
}

/// Create a test server over a fresh in-memory store
pub fn test_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let app = create_app_with(store, &test_jwt_settings());
    TestServer::new(app).expect("failed to start test server")
}

/// Register a user and return the session body
pub async fn register(
    server: &TestServer,
    username: &str,
    name: &str,
    password: &str,
) -> serde_json::Value {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "name": name,
            "password": password,
        }))
        .await;
    assert_eq!(
        response.status_code(),
        axum::http::StatusCode::OK,
        "registration failed: {}",
        response.text()
    );
    response.json()
}

/// Register a user and return just the access token
pub async fn register_and_token(
    server: &TestServer,
    username: &str,
    name: &str,
    password: &str,
) -> String {
    let body = register(server, username, name, password).await;
    body["accessToken"].as_str().expect("missing accessToken").to_string()
}

/// Build an Authorization header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Alter the last character of a token's signature
pub fn tamper(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let last = *chars.last().unwrap();
    *chars.last_mut().unwrap() = if last == 'Q' { 'A' } else { 'Q' };
    chars.into_iter().collect()
}

/// Upload a receipt and return its id
pub async fn upload_receipt(
    server: &TestServer,
    token: &str,
    title: &str,
    image: Vec<u8>,
) -> i64 {
    let form = MultipartForm::new().add_text("title", title).add_part(
        "image",
        Part::bytes(image).file_name("receipt.jpg").mime_type("image/jpeg"),
    );

    let response = server
        .post("/api/receipts")
        .add_header("Authorization", bearer(token))
        .multipart(form)
        .await;
    assert_eq!(
        response.status_code(),
        axum::http::StatusCode::OK,
        "upload failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    body["receiptId"].as_i64().expect("missing receiptId")
}
