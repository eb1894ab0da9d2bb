//! `GET /api/check-username-unique`.

use axum::{
    Json,
    extract::{Query, State},
};

use true_feedback_core::ApiResponse;
use true_feedback_core::schemas::UsernameQuery;

use crate::error::{AppError, Result};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Report whether a username is free.
///
/// Taken means held by a verified account, or by an unverified one whose
/// code is still valid.
pub async fn check_username_unique(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<ApiResponse>> {
    let username = query.validate()?;

    let available = AuthService::new(state.pool(), state.email())
        .is_username_available(&username)
        .await?;

    if available {
        Ok(Json(ApiResponse::ok("Username is unique")))
    } else {
        Err(AppError::Auth(AuthError::UsernameTaken))
    }
}
