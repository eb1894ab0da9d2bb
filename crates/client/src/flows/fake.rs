//! In-memory [`FeedbackApi`] for flow tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use true_feedback_core::ApiResponse;
use true_feedback_core::payloads::{
    AcceptMessagesStatus, MessagesPayload, SuggestionsPayload, UpdatedUser,
};
use true_feedback_core::schemas::{SendMessageRequest, SignUpRequest, VerifyCodeRequest};
use true_feedback_core::sign_in::{
    SessionPayload, SignInRequest, SignInResult, UNVERIFIED_ACCOUNT,
};

use crate::api::FeedbackApi;
use crate::error::ClientError;

#[derive(Default)]
pub struct FakeApi {
    taken: HashSet<String>,
    delays: HashMap<String, Duration>,
    accounts: HashMap<String, (String, bool)>,
    codes: HashMap<String, String>,
    offline: bool,
    checked: Mutex<Vec<String>>,
    signed_up: AtomicUsize,
}

impl FakeApi {
    pub fn with_taken(mut self, username: &str) -> Self {
        self.taken.insert(username.to_string());
        self
    }

    pub fn with_delay(mut self, username: &str, delay: Duration) -> Self {
        self.delays.insert(username.to_string(), delay);
        self
    }

    pub fn with_account(mut self, username: &str, password: &str, verified: bool) -> Self {
        self.accounts
            .insert(username.to_string(), (password.to_string(), verified));
        self
    }

    pub fn with_code(mut self, username: &str, code: &str) -> Self {
        self.codes.insert(username.to_string(), code.to_string());
        self
    }

    pub const fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }

    pub fn signed_up(&self) -> usize {
        self.signed_up.load(Ordering::SeqCst)
    }

    fn connection(&self) -> Result<(), ClientError> {
        if self.offline {
            return Err(ClientError::Decode {
                status: 0,
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl FeedbackApi for FakeApi {
    async fn check_username(&self, username: &str) -> Result<ApiResponse, ClientError> {
        self.checked.lock().unwrap().push(username.to_string());
        if let Some(delay) = self.delays.get(username) {
            tokio::time::sleep(*delay).await;
        }
        self.connection()?;
        if self.taken.contains(username) {
            Ok(ApiResponse::failure("Username is already taken"))
        } else {
            Ok(ApiResponse::ok("Username is unique"))
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<ApiResponse, ClientError> {
        self.connection()?;
        if self.taken.contains(&request.username) {
            return Ok(ApiResponse::failure("Username is already taken"));
        }
        self.signed_up.fetch_add(1, Ordering::SeqCst);
        Ok(ApiResponse::ok(
            "User registered successfully. Please verify your account.",
        ))
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<ApiResponse, ClientError> {
        self.connection()?;
        match self.codes.get(&request.username) {
            None => Ok(ApiResponse::failure("User not found")),
            Some(code) if *code == request.code => {
                Ok(ApiResponse::ok("Account verified successfully"))
            }
            Some(_) => Ok(ApiResponse::failure("Incorrect verification code")),
        }
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResult, ClientError> {
        self.connection()?;
        Ok(match self.accounts.get(&request.identifier) {
            Some((password, _)) if *password != request.password => {
                SignInResult::bad_credentials()
            }
            None => SignInResult::bad_credentials(),
            Some((_, false)) => SignInResult::failure(UNVERIFIED_ACCOUNT, 403),
            Some((_, true)) => SignInResult::success(request.callback_path()),
        })
    }

    async fn session(&self) -> Result<SessionPayload, ClientError> {
        self.connection()?;
        Ok(SessionPayload::default())
    }

    async fn sign_out(&self) -> Result<ApiResponse, ClientError> {
        self.connection()?;
        Ok(ApiResponse::ok("Signed out"))
    }

    async fn accept_messages_status(
        &self,
    ) -> Result<ApiResponse<AcceptMessagesStatus>, ClientError> {
        self.connection()?;
        Ok(ApiResponse::failure("Not Authenticated"))
    }

    async fn set_accept_messages(
        &self,
        _accept: bool,
    ) -> Result<ApiResponse<UpdatedUser>, ClientError> {
        self.connection()?;
        Ok(ApiResponse::failure("Not Authenticated"))
    }

    async fn send_message(&self, _request: &SendMessageRequest) -> Result<ApiResponse, ClientError> {
        self.connection()?;
        Ok(ApiResponse::ok("Message sent successfully"))
    }

    async fn get_messages(&self) -> Result<ApiResponse<MessagesPayload>, ClientError> {
        self.connection()?;
        Ok(ApiResponse::failure("Not Authenticated"))
    }

    async fn delete_message(&self, _id: &str) -> Result<ApiResponse, ClientError> {
        self.connection()?;
        Ok(ApiResponse::failure("Not Authenticated"))
    }

    async fn suggest_messages(&self) -> Result<ApiResponse<SuggestionsPayload>, ClientError> {
        self.connection()?;
        Ok(ApiResponse::failure("Failed to generate AI response"))
    }
}
