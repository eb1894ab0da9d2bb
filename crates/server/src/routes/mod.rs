//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                               - Landing page
//! GET    /sign-up                        - Sign-up form
//! GET    /sign-in                        - Sign-in form
//! GET    /verify/{username}              - Verification code form
//! GET    /dashboard                      - Inbox and settings (requires auth)
//! GET    /u/{username}                   - Public page for sending a message
//! GET    /health                         - Liveness probe
//! GET    /health/ready                   - Readiness probe (database ping)
//!
//! # Account API (strict rate limit)
//! POST   /api/sign-up                    - Register or re-issue a code
//! POST   /api/verify-code                - Verify a registration
//! POST   /api/auth/callback/credentials  - Credentials sign-in
//!
//! # API
//! GET    /api/check-username-unique      - Username availability
//! GET    /api/accept-messages            - Read acceptance flag (requires auth)
//! POST   /api/accept-messages            - Set acceptance flag (requires auth)
//! POST   /api/send-message               - Leave an anonymous message
//! GET    /api/get-messages               - List own messages (requires auth)
//! DELETE /api/delete-message/{id}        - Delete own message (requires auth)
//! POST   /api/suggest-messages           - AI question suggestions
//! GET    /api/auth/session               - Current session user
//! POST   /api/auth/sign-out              - End the session
//! ```

pub mod api;
pub mod auth;
pub mod health;
pub mod pages;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Sign-up, verification and sign-in.
pub fn auth_api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sign-up", post(api::sign_up::sign_up))
        .route("/api/verify-code", post(api::verify_code::verify_code))
        .route("/api/auth/callback/credentials", post(auth::sign_in))
}

/// Every other JSON endpoint.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/check-username-unique",
            get(api::check_username::check_username_unique),
        )
        .route(
            "/api/accept-messages",
            get(api::accept_messages::status).post(api::accept_messages::update),
        )
        .route("/api/send-message", post(api::messages::send_message))
        .route("/api/get-messages", get(api::messages::get_messages))
        .route(
            "/api/delete-message/{id}",
            delete(api::messages::delete_message),
        )
        .route(
            "/api/suggest-messages",
            post(api::suggest_messages::suggest_messages),
        )
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/sign-out", post(auth::sign_out))
}

/// Server-rendered pages and health probes.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/sign-up", get(pages::sign_up))
        .route("/sign-in", get(pages::sign_in))
        .route("/verify/{username}", get(pages::verify))
        .route("/dashboard", get(pages::dashboard))
        .route("/u/{username}", get(pages::profile))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// All routes without rate limiting.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_api_routes())
        .merge(api_routes())
        .merge(page_routes())
}

/// All routes, with per-IP rate limits on the API.
///
/// The limiters key on the client address, so the server must be started
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn rate_limited_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_api_routes().layer(auth_rate_limiter()))
        .merge(api_routes().layer(api_rate_limiter()))
        .merge(page_routes())
}
