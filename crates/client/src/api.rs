//! The API surface the flows are written against.

use std::future::Future;

use true_feedback_core::ApiResponse;
use true_feedback_core::payloads::{
    AcceptMessagesStatus, MessagesPayload, SuggestionsPayload, UpdatedUser,
};
use true_feedback_core::schemas::{SendMessageRequest, SignUpRequest, VerifyCodeRequest};
use true_feedback_core::sign_in::{SessionPayload, SignInRequest, SignInResult};

use crate::error::ClientError;

/// Every True Feedback endpoint, one method each.
///
/// Envelope endpoints resolve to the envelope whatever the HTTP status; only
/// transport and decoding failures are errors.
pub trait FeedbackApi: Send + Sync {
    /// `GET /api/check-username-unique`
    fn check_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `POST /api/sign-up`
    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `POST /api/verify-code`
    fn verify_code(
        &self,
        request: &VerifyCodeRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `POST /api/auth/callback/credentials`
    fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> impl Future<Output = Result<SignInResult, ClientError>> + Send;

    /// `GET /api/auth/session`
    fn session(&self) -> impl Future<Output = Result<SessionPayload, ClientError>> + Send;

    /// `POST /api/auth/sign-out`
    fn sign_out(&self) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `GET /api/accept-messages`
    fn accept_messages_status(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<AcceptMessagesStatus>, ClientError>> + Send;

    /// `POST /api/accept-messages`
    fn set_accept_messages(
        &self,
        accept: bool,
    ) -> impl Future<Output = Result<ApiResponse<UpdatedUser>, ClientError>> + Send;

    /// `POST /api/send-message`
    fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `GET /api/get-messages`
    fn get_messages(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<MessagesPayload>, ClientError>> + Send;

    /// `DELETE /api/delete-message/{id}`
    fn delete_message(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// `POST /api/suggest-messages`
    fn suggest_messages(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<SuggestionsPayload>, ClientError>> + Send;
}
