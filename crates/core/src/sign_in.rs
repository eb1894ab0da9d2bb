//! Credentials sign-in: request, result and session shapes.
//!
//! The result mirrors what a browser session library hands back from a
//! non-redirecting sign-in: an optional `error`, an optional `url`, and the
//! HTTP status. Callers branch on `error` first and treat a present `url` as
//! success.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::schemas::ValidationErrors;
use crate::types::{Email, UserId, Username};

/// Error value reported for an unknown identifier or a wrong password.
///
/// Both cases share one value so a failed sign-in never reveals whether an
/// account exists.
pub const CREDENTIALS_SIGNIN: &str = "CredentialsSignin";

/// Error value reported when the password matched but the account has not
/// been verified yet.
pub const UNVERIFIED_ACCOUNT: &str = "Please verify your account before logging in";

/// Where a successful sign-in lands when the caller gives no callback URL.
pub const DEFAULT_CALLBACK_URL: &str = "/dashboard";

/// Body of `POST /api/auth/callback/credentials`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
    /// Accepted for compatibility; the endpoint never redirects.
    #[serde(default)]
    pub redirect: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .field("redirect", &self.redirect)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

impl SignInRequest {
    /// A non-redirecting request, as the sign-in page sends it.
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
            redirect: false,
            callback_url: None,
        }
    }

    /// Both fields must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns every empty field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.identifier.trim().is_empty() {
            errors.push("identifier", "Identifier is required");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Local path to land on after success. Absolute or protocol-relative
    /// URLs are ignored so the endpoint cannot be used as an open redirect.
    #[must_use]
    pub fn callback_path(&self) -> &str {
        match self.callback_url.as_deref() {
            Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
            _ => DEFAULT_CALLBACK_URL,
        }
    }
}

/// Outcome of a credentials sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResult {
    pub error: Option<String>,
    pub status: u16,
    pub ok: bool,
    pub url: Option<String>,
}

impl SignInResult {
    /// Successful sign-in landing on `url`.
    #[must_use]
    pub fn success(url: impl Into<String>) -> Self {
        Self {
            error: None,
            status: 200,
            ok: true,
            url: Some(url.into()),
        }
    }

    /// Failed sign-in reporting `error`.
    #[must_use]
    pub fn failure(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: Some(error.into()),
            status,
            ok: false,
            url: None,
        }
    }

    /// Unknown identifier or wrong password.
    #[must_use]
    pub fn bad_credentials() -> Self {
        Self::failure(CREDENTIALS_SIGNIN, 401)
    }
}

/// The signed-in user as exposed by `GET /api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
}

/// `GET /api/auth/session` body: `{"user": {...}}` or `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SignInRequest =
            serde_json::from_value(json!({"identifier": "eve", "password": "pw"})).unwrap();
        assert!(!request.redirect);
        assert_eq!(request.callback_path(), "/dashboard");
    }

    #[test]
    fn test_callback_path_rejects_external_urls() {
        let mut request = SignInRequest::new("eve", "pw");
        request.callback_url = Some("https://evil.example/".to_string());
        assert_eq!(request.callback_path(), "/dashboard");
        request.callback_url = Some("//evil.example/".to_string());
        assert_eq!(request.callback_path(), "/dashboard");
        request.callback_url = Some("/u/eve".to_string());
        assert_eq!(request.callback_path(), "/u/eve");
    }

    #[test]
    fn test_request_validation() {
        let errors = SignInRequest::new("  ", "").validate().unwrap_err();
        assert_eq!(errors.for_field("identifier"), Some("Identifier is required"));
        assert_eq!(errors.for_field("password"), Some("Password is required"));
        assert!(SignInRequest::new("eve", "pw").validate().is_ok());
    }

    #[test]
    fn test_result_shapes() {
        assert_eq!(
            serde_json::to_value(SignInResult::bad_credentials()).unwrap(),
            json!({"error": "CredentialsSignin", "status": 401, "ok": false, "url": null})
        );
        assert_eq!(
            serde_json::to_value(SignInResult::success("/dashboard")).unwrap(),
            json!({"error": null, "status": 200, "ok": true, "url": "/dashboard"})
        );
    }

    #[test]
    fn test_empty_session_serializes_as_empty_object() {
        assert_eq!(
            serde_json::to_value(SessionPayload::default()).unwrap(),
            json!({})
        );
    }
}
