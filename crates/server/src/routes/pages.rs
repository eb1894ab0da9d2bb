//! Server-rendered pages.
//!
//! Forms on these pages are driven by `static/js/app.js`, which talks to the
//! JSON API; the handlers here only render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use true_feedback_core::Username;

use crate::db::{MessageRepository, UserRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Message};
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/sign_up.html")]
pub struct SignUpTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/sign_in.html")]
pub struct SignInTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Verification page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/verify.html")]
pub struct VerifyTemplate {
    pub current_user: Option<CurrentUser>,
    pub username: String,
}

/// A message as shown on the dashboard.
pub struct MessageCard {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageCard {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            content: message.content,
            created_at: message.created_at.format("%b %-d, %Y %-I:%M %p").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub username: String,
    pub profile_url: String,
    pub is_accepting_messages: bool,
    pub messages: Vec<MessageCard>,
}

/// Public send-message page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/profile.html")]
pub struct ProfileTemplate {
    pub current_user: Option<CurrentUser>,
    pub username: String,
    pub found: bool,
}

/// `GET /`
pub async fn home(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate { current_user }
}

/// `GET /sign-up`
pub async fn sign_up(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    SignUpTemplate { current_user }
}

/// `GET /sign-in`
pub async fn sign_in(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    SignInTemplate { current_user }
}

/// `GET /verify/{username}`
pub async fn verify(
    OptionalAuth(current_user): OptionalAuth,
    Path(username): Path<String>,
) -> impl IntoResponse {
    VerifyTemplate {
        current_user,
        username,
    }
}

/// `GET /dashboard`: redirects to `/sign-in` without a session.
pub async fn dashboard(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<Response> {
    let Some(session_user) = current_user else {
        return Ok(Redirect::to("/sign-in").into_response());
    };

    let Some(user) = UserRepository::new(state.pool())
        .get_by_id(session_user.id)
        .await?
    else {
        // Account removed since sign-in
        return Ok(Redirect::to("/sign-in").into_response());
    };

    let messages = MessageRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(DashboardTemplate {
        profile_url: profile_url(&state.config().base_url, &user.username),
        username: user.username.to_string(),
        is_accepting_messages: user.is_accepting_messages,
        messages: messages.into_iter().map(Into::into).collect(),
        current_user: Some(session_user),
    }
    .into_response())
}

/// `GET /u/{username}`
pub async fn profile(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(username): Path<String>,
) -> Result<Response> {
    let found = match Username::parse(&username) {
        Ok(parsed) => UserRepository::new(state.pool())
            .get_by_username(&parsed)
            .await?
            .is_some(),
        Err(_) => false,
    };

    let page = ProfileTemplate {
        current_user,
        username,
        found,
    };
    let status = if found {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, page).into_response())
}

/// Public link a user shares to receive messages.
#[must_use]
pub fn profile_url(base_url: &str, username: &Username) -> String {
    format!("{base_url}/u/{}", urlencoding::encode(username.as_str()))
}
