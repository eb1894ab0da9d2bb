//! `GET`/`POST /api/accept-messages`.
//!
//! Both methods require a session. The store is authoritative; the session
//! copy of the flag is refreshed after a write.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use true_feedback_core::ApiResponse;
use true_feedback_core::payloads::{AcceptMessagesStatus, UpdatedUser};
use true_feedback_core::schemas::AcceptMessageRequest;

use crate::db::UserRepository;
use crate::error::{ApiJson, AppError, Result};
use crate::middleware::{RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Set the signed-in user's message-acceptance flag.
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<AcceptMessageRequest>,
) -> Result<Json<ApiResponse<UpdatedUser>>> {
    let updated = UserRepository::new(state.pool())
        .set_accepting_messages(user.id, request.accept_message)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    set_current_user(&session, &CurrentUser::from(&updated)).await?;
    tracing::info!(
        accepting = updated.is_accepting_messages,
        "Message acceptance updated"
    );

    Ok(Json(ApiResponse::success(
        "Message acceptance status updated successfully",
        UpdatedUser {
            updated_user: updated.profile(),
        },
    )))
}

/// Read the signed-in user's message-acceptance flag from the store.
pub async fn status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ApiResponse<AcceptMessagesStatus>>> {
    let found = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Message acceptance status fetched",
        AcceptMessagesStatus {
            is_accepting_messages: found.is_accepting_messages,
        },
    )))
}
