//! `POST /api/sign-up`.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use true_feedback_core::ApiResponse;
use true_feedback_core::schemas::SignUpRequest;

use crate::error::{ApiJson, Result, add_breadcrumb};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Register an unverified account and send its verification code.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignUpRequest>,
) -> Result<impl IntoResponse> {
    let valid = request.validate()?;
    add_breadcrumb("auth", "Sign-up submitted", Some(&[("username", valid.username.as_str())]));

    AuthService::new(state.pool(), state.email())
        .sign_up(&valid)
        .await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(ApiResponse::ok(
            "User registered successfully. Please verify your account.",
        )),
    ))
}
