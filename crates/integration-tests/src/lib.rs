//! End-to-end tests for True Feedback.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate a scratch database and start the server without SMTP
//! cargo run -p true-feedback-cli -- migrate
//! cargo run -p true-feedback-server
//!
//! # Run the ignored tests against it
//! cargo test -p true-feedback-integration-tests -- --ignored
//! ```
//!
//! The tests read verification codes straight from the database, so they
//! need the same `FEEDBACK_DATABASE_URL` as the server.
//!
//! # Environment Variables
//!
//! - `FEEDBACK_TEST_BASE_URL` - Server under test (default: `http://localhost:3000`)
//! - `FEEDBACK_DATABASE_URL` - Its database (falls back to `DATABASE_URL`)

#![allow(clippy::expect_used, clippy::unwrap_used)]

use sqlx::PgPool;
use uuid::Uuid;

use true_feedback_client::{FeedbackApi, HttpApi};
use true_feedback_core::schemas::{SignUpRequest, VerifyCodeRequest};
use true_feedback_core::sign_in::SignInRequest;

/// Password used for every account the tests create.
pub const PASSWORD: &str = "correct-horse-battery";

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("FEEDBACK_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Connect to the server's database.
///
/// # Panics
///
/// Panics if no database URL is set or the database is unreachable.
pub async fn pool() -> PgPool {
    let url = std::env::var("FEEDBACK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("FEEDBACK_DATABASE_URL or DATABASE_URL must be set");
    PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database")
}

/// A fresh client with its own cookie jar.
///
/// # Panics
///
/// Panics if the base URL is invalid.
#[must_use]
pub fn client() -> HttpApi {
    HttpApi::new(&base_url()).expect("Failed to create HTTP client")
}

/// A username no earlier run has used. Fits the 20-character limit.
#[must_use]
pub fn unique_username() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("it_{}", &id[..12])
}

/// Registration form for `username`.
#[must_use]
pub fn sign_up_form(username: &str) -> SignUpRequest {
    SignUpRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: PASSWORD.to_string(),
    }
}

/// Number of rows in `users` for `username`.
///
/// # Panics
///
/// Panics if the query fails.
pub async fn count_users(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// The pending verification code for `username`.
///
/// # Panics
///
/// Panics if the user does not exist or has no code.
pub async fn verify_code_for(pool: &PgPool, username: &str) -> String {
    let code: Option<String> =
        sqlx::query_scalar("SELECT verify_code FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await
            .unwrap();
    code.expect("user has no pending verification code")
}

/// Sign up, verify and sign in a new user on `api`. Returns the username.
///
/// # Panics
///
/// Panics if any step fails.
pub async fn signed_in_user(api: &HttpApi, pool: &PgPool) -> String {
    let username = unique_username();

    let response = api.sign_up(&sign_up_form(&username)).await.unwrap();
    assert!(response.success, "sign-up failed: {}", response.message);

    let code = verify_code_for(pool, &username).await;
    let response = api
        .verify_code(&VerifyCodeRequest {
            username: username.clone(),
            code,
        })
        .await
        .unwrap();
    assert!(response.success, "verify failed: {}", response.message);

    let result = api
        .sign_in(&SignInRequest::new(&username, PASSWORD))
        .await
        .unwrap();
    assert!(result.ok, "sign-in failed: {:?}", result.error);

    username
}

/// Move `username`'s code expiry into the past.
///
/// # Panics
///
/// Panics if the update fails.
pub async fn expire_verification(pool: &PgPool, username: &str) {
    sqlx::query(
        "UPDATE users SET verify_code_expires_at = NOW() - INTERVAL '1 minute'
         WHERE username = $1",
    )
    .bind(username)
    .execute(pool)
    .await
    .unwrap();
}

/// Id and email of the row holding `username`, if any.
///
/// # Panics
///
/// Panics if the query fails.
pub async fn user_row(pool: &PgPool, username: &str) -> Option<(i32, String)> {
    sqlx::query_as("SELECT id, email FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .unwrap()
}

/// Remove `username` and everything it owns.
///
/// # Panics
///
/// Panics if the delete fails.
pub async fn delete_user(pool: &PgPool, username: &str) {
    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
}
