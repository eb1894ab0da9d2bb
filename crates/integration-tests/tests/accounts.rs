//! Sign-up, verification and sign-in against a running server.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The server running without SMTP (codes are read from the database)
//!
//! Run with: cargo test -p true-feedback-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use true_feedback_client::{
    FeedbackApi, Navigation, SignInFlow, SignUpFlow, ToastKind, UsernameChecker, UsernameStatus,
    VerifyFlow,
};
use true_feedback_core::schemas::VerifyCodeRequest;
use true_feedback_core::sign_in::SignInRequest;
use true_feedback_integration_tests::{
    PASSWORD, client, count_users, expire_verification, pool, sign_up_form, signed_in_user,
    unique_username, user_row, verify_code_for,
};

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_up_creates_one_user_and_goes_to_verify() {
    let api = client();
    let pool = pool().await;
    let username = unique_username();

    let outcome = SignUpFlow::new(&api).submit(&sign_up_form(&username)).await;

    assert_eq!(
        outcome.navigation,
        Some(Navigation::Replace(format!("/verify/{username}")))
    );
    assert_eq!(count_users(&pool, &username).await, 1);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_up_with_verified_username_creates_nothing() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;

    let mut form = sign_up_form(&username);
    form.email = format!("other-{}@example.com", unique_username());
    let outcome = SignUpFlow::new(&client()).submit(&form).await;

    assert_eq!(outcome.navigation, None);
    let toast = outcome.toast.unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.title, "Username is already taken");
    assert_eq!(count_users(&pool, &username).await, 1);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_up_with_verified_email_creates_nothing() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;

    let newcomer = unique_username();
    let mut form = sign_up_form(&newcomer);
    form.email = format!("{username}@example.com");
    let outcome = SignUpFlow::new(&client()).submit(&form).await;

    assert_eq!(
        outcome.toast.unwrap().title,
        "User already exists with this email"
    );
    assert_eq!(count_users(&pool, &newcomer).await, 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_up_again_with_unverified_email_reissues_in_place() {
    let api = client();
    let pool = pool().await;
    let first = unique_username();
    let form = sign_up_form(&first);
    assert!(api.sign_up(&form).await.unwrap().success);
    let (id, email) = user_row(&pool, &first).await.unwrap();

    let second = unique_username();
    let mut again = sign_up_form(&second);
    again.email.clone_from(&form.email);
    let response = api.sign_up(&again).await.unwrap();

    assert!(response.success, "{}", response.message);
    assert_eq!(count_users(&pool, &first).await, 0);
    assert_eq!(user_row(&pool, &second).await, Some((id, email)));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_pending_username_blocks_other_email() {
    let api = client();
    let pool = pool().await;
    let username = unique_username();
    assert!(api.sign_up(&sign_up_form(&username)).await.unwrap().success);
    let holder = user_row(&pool, &username).await.unwrap();

    let mut rival = sign_up_form(&username);
    rival.email = format!("rival-{}@example.com", unique_username());
    let response = api.sign_up(&rival).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.message, "Username is already taken");
    assert_eq!(user_row(&pool, &username).await, Some(holder));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_expired_pending_username_is_reclaimed() {
    let api = client();
    let pool = pool().await;
    let username = unique_username();
    assert!(api.sign_up(&sign_up_form(&username)).await.unwrap().success);
    let (old_id, _) = user_row(&pool, &username).await.unwrap();
    expire_verification(&pool, &username).await;

    let mut claimant = sign_up_form(&username);
    claimant.email = format!("claimant-{}@example.com", unique_username());
    let response = api.sign_up(&claimant).await.unwrap();

    assert!(response.success, "{}", response.message);
    let (new_id, email) = user_row(&pool, &username).await.unwrap();
    assert_ne!(new_id, old_id);
    assert_eq!(email, claimant.email);
    let old_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(old_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(old_rows, 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_username_check_reports_taken_names() {
    let api = client();
    let pool = pool().await;
    let username = signed_in_user(&api, &pool).await;

    let checker = UsernameChecker::new(&api);
    let mut taken = Vec::new();
    checker
        .on_input(&username, |status| taken.push(status))
        .await;
    assert_eq!(
        taken,
        vec![
            UsernameStatus::Checking,
            UsernameStatus::Unavailable("Username is already taken".to_string())
        ]
    );

    let mut free = Vec::new();
    checker
        .on_input(&unique_username(), |status| free.push(status))
        .await;
    assert!(matches!(
        free.as_slice(),
        [UsernameStatus::Checking, UsernameStatus::Available(_)]
    ));
}

// ============================================================================
// Verification
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_verify_wrong_then_right_code() {
    let api = client();
    let pool = pool().await;
    let username = unique_username();
    assert!(api.sign_up(&sign_up_form(&username)).await.unwrap().success);

    let code = verify_code_for(&pool, &username).await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let flow = VerifyFlow::new(&api, &username);
    let outcome = flow.submit(wrong).await;
    assert_eq!(
        outcome.toast.unwrap().description.as_deref(),
        Some("Incorrect verification code")
    );

    let outcome = flow.submit(&code).await;
    assert_eq!(
        outcome.navigation,
        Some(Navigation::Replace("/sign-in".to_string()))
    );

    let outcome = flow.submit(&code).await;
    assert_eq!(
        outcome.toast.unwrap().description.as_deref(),
        Some("Account is already verified")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_verify_with_expired_code() {
    let api = client();
    let pool = pool().await;
    let username = unique_username();
    assert!(api.sign_up(&sign_up_form(&username)).await.unwrap().success);
    let code = verify_code_for(&pool, &username).await;
    expire_verification(&pool, &username).await;

    let response = api
        .verify_code(&VerifyCodeRequest {
            username: username.clone(),
            code,
        })
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(
        response.message,
        "Verification code has expired. Please sign up again to get a new code."
    );
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_in_with_wrong_password() {
    let pool = pool().await;
    let username = signed_in_user(&client(), &pool).await;

    let outcome = SignInFlow::new(&client())
        .submit(&SignInRequest::new(&username, "not-the-password"))
        .await;

    assert_eq!(outcome.navigation, None);
    let toast = outcome.toast.unwrap();
    assert_eq!(toast.title, "Login Failed");
    assert_eq!(
        toast.description.as_deref(),
        Some("Incorrect username or password")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_in_before_verifying_shows_server_text() {
    let api = client();
    let username = unique_username();
    assert!(api.sign_up(&sign_up_form(&username)).await.unwrap().success);

    let outcome = SignInFlow::new(&api)
        .submit(&SignInRequest::new(&username, PASSWORD))
        .await;

    assert_eq!(outcome.navigation, None);
    assert_eq!(
        outcome.toast.unwrap().description.as_deref(),
        Some("Please verify your account before logging in")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_sign_in_by_email_and_sign_out() {
    let pool = pool().await;
    let username = signed_in_user(&client(), &pool).await;

    let api = client();
    let outcome = SignInFlow::new(&api)
        .submit(&SignInRequest::new(
            format!("{username}@example.com"),
            PASSWORD,
        ))
        .await;
    assert_eq!(
        outcome.navigation,
        Some(Navigation::Replace("/dashboard".to_string()))
    );

    let session = api.session().await.unwrap();
    assert_eq!(session.user.unwrap().username.as_str(), username);

    assert!(api.sign_out().await.unwrap().success);
    assert!(api.session().await.unwrap().user.is_none());
}
