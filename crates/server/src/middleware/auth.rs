//! Authentication extractors.
//!
//! Session data that is missing, unreadable or malformed all count as "not
//! signed in": the extractors fail closed.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::models::session::keys;

/// Extractor that requires a signed-in user.
///
/// Rejects with the `401 {"success": false, "message": "Not Authenticated"}`
/// envelope.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts)
            .await
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await))
    }
}

async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts.extensions.get::<Session>()?;

    match session.get::<CurrentUser>(keys::CURRENT_USER).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session user; treating as signed out");
            None
        }
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use serde_json::json;
    use tower_sessions::MemoryStore;

    use super::*;

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, ()) = Request::builder()
            .uri("/api/accept-messages")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_no_session_layer_is_unauthenticated() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_empty_session_is_unauthenticated() {
        let mut parts = parts_with(Some(session()));
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_malformed_session_user_fails_closed() {
        let session = session();
        session
            .insert(keys::CURRENT_USER, json!({"id": "not-a-number"}))
            .await
            .unwrap();
        let mut parts = parts_with(Some(session));
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_signed_in_user_is_extracted() {
        let session = session();
        let user: CurrentUser = serde_json::from_value(json!({
            "id": 3,
            "username": "lena",
            "email": "lena@example.org",
            "is_verified": true,
            "is_accepting_messages": false
        }))
        .unwrap();
        set_current_user(&session, &user).await.unwrap();

        let mut parts = parts_with(Some(session.clone()));
        let RequireAuth(found) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(found.username.as_str(), "lena");
        assert!(!found.is_accepting_messages);

        clear_current_user(&session).await.unwrap();
        let mut parts = parts_with(Some(session));
        assert!(RequireAuth::from_request_parts(&mut parts, &()).await.is_err());
    }
}
