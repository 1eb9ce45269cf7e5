//! Receipt API integration tests
//!
//! Upload, public image/details reads, and owner-only deletion.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::{bearer, register_and_token, test_server, upload_receipt};

#[tokio::test]
async fn test_upload_and_fetch_image() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;

    let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02];
    let receipt_id = upload_receipt(&server, &token, "Lunch", image.clone()).await;

    // The image is a public read: no token.
    let response = server
        .get(&format!("/api/receipts/{receipt_id}/image"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), image.as_slice());
}

#[tokio::test]
async fn test_upload_requires_token() {
    let server = test_server();

    let form = MultipartForm::new().add_text("title", "Lunch").add_part(
        "image",
        Part::bytes(vec![1, 2, 3]).file_name("r.jpg").mime_type("image/jpeg"),
    );

    let response = server.post("/api/receipts").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_without_file_rejected() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;

    let form = MultipartForm::new().add_text("title", "No image here");
    let response = server
        .post("/api/receipts")
        .add_header("Authorization", bearer(&token))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file uploaded.");
}

#[tokio::test]
async fn test_details_are_public_and_carry_likes_count() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;
    let receipt_id = upload_receipt(&server, &token, "Lunch", vec![1, 2, 3]).await;

    let response = server.get(&format!("/api/receipts/{receipt_id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Lunch");
    assert_eq!(body["userName"], "bob.k");
    assert_eq!(body["likesCount"], 0);
    assert_eq!(
        body["imageUrl"],
        format!("/api/receipts/{receipt_id}/image")
    );
}

#[tokio::test]
async fn test_unknown_receipt_is_404() {
    let server = test_server();
    assert_eq!(
        server.get("/api/receipts/999").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        server.get("/api/receipts/999/image").await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_owner_can_delete() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;
    let receipt_id = upload_receipt(&server, &token, "Lunch", vec![1, 2, 3]).await;

    let response = server
        .delete(&format!("/api/receipts/{receipt_id}"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Gone afterwards.
    assert_eq!(
        server
            .get(&format!("/api/receipts/{receipt_id}"))
            .await
            .status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_non_owner_delete_is_forbidden_and_resource_survives() {
    let server = test_server();
    let owner = register_and_token(&server, "alice", "Alice", "password123").await;
    let intruder = register_and_token(&server, "mallory", "Mallory", "password123").await;

    let receipt_id = upload_receipt(&server, &owner, "Alice's receipt", vec![9, 9]).await;

    let response = server
        .delete(&format!("/api/receipts/{receipt_id}"))
        .add_header("Authorization", bearer(&intruder))
        .await;

    // Forbidden is distinct from not-found.
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // The receipt is still there.
    assert_eq!(
        server
            .get(&format!("/api/receipts/{receipt_id}"))
            .await
            .status_code(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_delete_unknown_receipt_is_404_not_403() {
    let server = test_server();
    let token = register_and_token(&server, "bob.k", "Bob", "Secr3t!pass").await;

    let response = server
        .delete("/api/receipts/424242")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
