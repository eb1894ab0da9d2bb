//! `POST /api/verify-code`.

use axum::{Json, extract::State};
use tracing::instrument;

use true_feedback_core::ApiResponse;
use true_feedback_core::schemas::VerifyCodeRequest;

use crate::error::{ApiJson, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Consume the emailed code and mark the account verified.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn verify_code(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyCodeRequest>,
) -> Result<Json<ApiResponse>> {
    let valid = request.validate()?;

    AuthService::new(state.pool(), state.email())
        .verify_code(&valid)
        .await?;

    Ok(Json(ApiResponse::ok("Account verified successfully")))
}
