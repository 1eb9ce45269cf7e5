//! Authentication API integration tests
//!
//! End-to-end tests for registration, login, and the bearer-token guard,
//! driven through the HTTP surface against the in-memory store.

mod common;

use axum::http::StatusCode;
use common::{bearer, register, register_and_token, tamper, test_server};

#[tokio::test]
async fn test_register_returns_session() {
    let server = test_server();

    let body = register(&server, "bob.k", "Bob", "Secr3t!pass").await;
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["expiresAt"].as_str().unwrap().is_empty());
    assert_eq!(body["username"], "bob.k");
    assert_eq!(body["name"], "Bob");
    // The password never appears in the response.
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_normalizes_username() {
    let server = test_server();
    let body = register(&server, "  Alice.W ", "Alice", "password123").await;
    assert_eq!(body["username"], "alice.w");
}

#[tokio::test]
async fn test_register_rejects_invalid_username() {
    let server = test_server();

    for bad in ["ab", "has space", "dash-ed", "way!bad"] {
        let response = server
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "username": bad,
                "name": "X",
                "password": "password123",
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{bad}");
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let server = test_server();
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "bob.k",
            "name": "Bob",
            "password": "",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_rejected_including_case_variants() {
    let server = test_server();
    register(&server, "alice", "Alice", "password123").await;

    // Same username, different case: same account, rejected.
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": "Alice",
            "name": "Another Alice",
            "password": "password456",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Username is already taken.");
}

#[tokio::test]
async fn test_login_after_register() {
    let server = test_server();
    register(&server, "bob.k", "Bob", "Secr3t!pass").await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": "BOB.K",
            "password": "Secr3t!pass",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert_eq!(body["username"], "bob.k");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = test_server();
    register(&server, "alice", "Alice", "password123").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": "alice",
            "password": "wrong-password",
        }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": "nobody",
            "password": "password123",
        }))
        .await;

    // Byte-identical outcomes: no username enumeration.
    assert_eq!(wrong_password.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status_code(), unknown_user.status_code());
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn test_guarded_endpoint_flow() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!").await;

    // With the fresh token: allowed.
    let ok = server
        .get("/api/hello")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    assert!(ok.text().contains("bob.k"));

    // No header: rejected before the handler runs.
    let missing = server.get("/api/hello").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    // Tampered signature: rejected.
    let forged = server
        .get("/api/hello")
        .add_header("Authorization", bearer(&tamper(&token)))
        .await;
    assert_eq!(forged.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header_rejected() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;

    // Token without the Bearer scheme.
    let response = server
        .get("/api/hello")
        .add_header("Authorization", token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_different_secret_rejected() {
    let server = test_server();
    register(&server, "bob.k", "Bob", "Secr3t!pass").await;

    // A structurally valid JWT signed with the wrong key.
    let foreign = {
        use receiptshare::backend::auth::sessions::Tokens;
        use receiptshare::backend::auth::users::User;
        use receiptshare::backend::server::config::JwtSettings;

        let settings = JwtSettings {
            secret: "a-completely-different-key".to_string(),
            issuer: "receiptshare".to_string(),
            audience: "receiptshare".to_string(),
            access_token_minutes: 15,
        };
        let user = User {
            id: 1,
            username: "bob.k".to_string(),
            name: "Bob".to_string(),
            password_hash: String::new(),
            created_at: chrono::Utc::now(),
        };
        Tokens::new(&settings).issue(&user).unwrap().0
    };

    let response = server
        .get("/api/hello")
        .add_header("Authorization", bearer(&foreign))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
