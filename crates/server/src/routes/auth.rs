//! Credentials sign-in and session endpoints.
//!
//! These return the sign-in result and session shapes rather than the
//! envelope, matching what the browser session client expects.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use true_feedback_core::ApiResponse;
use true_feedback_core::sign_in::{SessionPayload, SignInRequest, SignInResult, UNVERIFIED_ACCOUNT};

use crate::error::{ApiJson, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// `POST /api/auth/callback/credentials`.
///
/// Unknown identifiers and wrong passwords produce the same result, so the
/// response never reveals whether an account exists.
#[instrument(skip(state, session, request))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<SignInRequest>,
) -> Result<impl IntoResponse> {
    if let Err(errors) = request.validate() {
        return Ok(respond(SignInResult::failure(errors.to_string(), 400)));
    }

    let outcome = AuthService::new(state.pool(), state.email())
        .sign_in(&request.identifier, &request.password)
        .await;

    let user = match outcome {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Sign-in rejected: bad credentials");
            return Ok(respond(SignInResult::bad_credentials()));
        }
        Err(AuthError::NotVerified) => {
            tracing::info!("Sign-in rejected: account not verified");
            return Ok(respond(SignInResult::failure(UNVERIFIED_ACCOUNT, 403)));
        }
        Err(other) => return Err(other.into()),
    };

    // New session id on privilege change
    session.cycle_id().await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.username.as_str()));
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(respond(SignInResult::success(request.callback_path())))
}

fn respond(result: SignInResult) -> (StatusCode, Json<SignInResult>) {
    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::OK);
    (status, Json(result))
}

/// `GET /api/auth/session`: `{"user": {...}}` when signed in, `{}` otherwise.
pub async fn session(OptionalAuth(user): OptionalAuth) -> Json<SessionPayload> {
    Json(SessionPayload {
        user: user.map(Into::into),
    })
}

/// `POST /api/auth/sign-out`.
pub async fn sign_out(session: Session) -> Result<Json<ApiResponse>> {
    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();
    Ok(Json(ApiResponse::ok("Signed out")))
}
