//! Anonymous message endpoints.
//!
//! - `POST /api/send-message` (public)
//! - `GET /api/get-messages` (signed in)
//! - `DELETE /api/delete-message/{id}` (signed in, owner only)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use true_feedback_core::payloads::MessagesPayload;
use true_feedback_core::schemas::SendMessageRequest;
use true_feedback_core::{ApiResponse, MessageId};

use crate::db::{MessageRepository, RepositoryError, UserRepository};
use crate::error::{ApiJson, AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Leave an anonymous message for a user.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    let valid = request.validate()?;

    let recipient = UserRepository::new(state.pool())
        .get_by_username(&valid.username)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    if !recipient.is_accepting_messages {
        return Err(AppError::Forbidden(
            "User is not accepting messages".to_string(),
        ));
    }

    MessageRepository::new(state.pool())
        .create(recipient.id, &valid.content)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(USER_NOT_FOUND.to_string()),
            other => AppError::Database(other),
        })?;

    tracing::info!(user_id = %recipient.id, "Anonymous message delivered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Message sent successfully")),
    ))
}

/// List the signed-in user's messages, newest first.
pub async fn get_messages(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ApiResponse<MessagesPayload>>> {
    UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    let messages = MessageRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Messages fetched",
        MessagesPayload {
            messages: messages.into_iter().map(Into::into).collect(),
        },
    )))
}

/// Delete one of the signed-in user's messages.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    let not_found = || AppError::NotFound("Message not found or already deleted".to_string());

    let id: MessageId = id.parse().map_err(|_| not_found())?;
    let deleted = MessageRepository::new(state.pool())
        .delete_owned(user.id, id)
        .await?;

    if !deleted {
        return Err(not_found());
    }
    Ok(Json(ApiResponse::ok("Message deleted")))
}
