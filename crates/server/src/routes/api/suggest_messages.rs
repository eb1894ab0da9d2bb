//! `POST /api/suggest-messages`.

use axum::{Json, extract::State};

use true_feedback_core::ApiResponse;
use true_feedback_core::payloads::SuggestionsPayload;

use crate::error::Result;
use crate::services::suggestions;
use crate::state::AppState;

/// Generate a fresh set of conversation starters on demand.
///
/// Any upstream failure becomes `502 "Failed to generate AI response"`.
pub async fn suggest_messages(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SuggestionsPayload>>> {
    let payload = suggestions::generate(state.gemini()).await?;
    Ok(Json(ApiResponse::success("Suggestions generated", payload)))
}
