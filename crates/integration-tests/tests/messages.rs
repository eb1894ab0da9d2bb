//! Message acceptance, delivery and deletion against a running server.
//!
//! Run with: cargo test -p true-feedback-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;

use true_feedback_client::FeedbackApi;
use true_feedback_core::schemas::SendMessageRequest;
use true_feedback_integration_tests::{base_url, client, delete_user, pool, signed_in_user};

fn message(username: &str, content: &str) -> SendMessageRequest {
    SendMessageRequest {
        username: username.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_accept_messages_requires_session() {
    let http = reqwest::Client::new();

    for request in [
        http.get(format!("{}/api/accept-messages", base_url())),
        http.post(format!("{}/api/accept-messages", base_url()))
            .json(&serde_json::json!({"acceptMessage": false})),
    ] {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("x-request-id"));
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not Authenticated");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_toggle_accept_messages() {
    let api = client();
    let pool = pool().await;
    signed_in_user(&api, &pool).await;

    let updated = api.set_accept_messages(false).await.unwrap();
    assert!(updated.success);
    assert_eq!(
        updated.message,
        "Message acceptance status updated successfully"
    );
    assert!(!updated.data.unwrap().updated_user.is_accepting_messages);

    let status = api.accept_messages_status().await.unwrap();
    assert!(!status.data.unwrap().is_accepting_messages);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_accept_messages_for_deleted_account() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;
    delete_user(&pool, &username).await;

    let status = api.accept_messages_status().await.unwrap();
    assert!(!status.success);
    assert_eq!(status.message, "User not found");

    let updated = api.set_accept_messages(true).await.unwrap();
    assert!(!updated.success);
    assert_eq!(updated.message, "User not found");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_closed_inbox_rejects_messages() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;
    api.set_accept_messages(false).await.unwrap();

    let response = client()
        .send_message(&message(&username, "Would you still hear from me?"))
        .await
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "User is not accepting messages");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_send_list_and_delete_messages() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;

    let anonymous = client();
    for content in ["What are you reading lately?", "Favourite place to travel?"] {
        let response = anonymous
            .send_message(&message(&username, content))
            .await
            .unwrap();
        assert!(response.success, "{}", response.message);
    }

    let listed = api.get_messages().await.unwrap().data.unwrap().messages;
    assert_eq!(listed.len(), 2);
    // Newest first
    assert_eq!(listed[0].content, "Favourite place to travel?");

    let id = listed[0].id.to_string();
    assert!(api.delete_message(&id).await.unwrap().success);

    let again = api.delete_message(&id).await.unwrap();
    assert!(!again.success);
    assert_eq!(again.message, "Message not found or already deleted");

    let listed = api.get_messages().await.unwrap().data.unwrap().messages;
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_message_to_unknown_user() {
    let response = client()
        .send_message(&message("nobody_here_123", "Is anyone out there?"))
        .await
        .unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "User not found");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_public_profile_page() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;

    let http = reqwest::Client::new();
    let found = http
        .get(format!("{}/u/{username}", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    assert!(found.text().await.unwrap().contains(&username));

    let missing = http
        .get(format!("{}/u/nobody_here_123", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
