//! Form payloads and their validators.
//!
//! Each request type is the raw wire shape. Calling `validate()` checks
//! every field, collects all failures, and on success returns a typed value
//! whose fields can no longer be invalid. The client runs the same checks
//! before submitting; the server runs them again on every body it receives.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Email, Username, VerificationCode};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Anonymous message length bounds, in characters.
pub const MIN_MESSAGE_LENGTH: usize = 10;
/// See [`MIN_MESSAGE_LENGTH`].
pub const MAX_MESSAGE_LENGTH: usize = 300;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: String,
    /// Message suitable for display next to the field.
    pub message: String,
}

/// All field errors found in one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_owned(),
            message: message.into(),
        });
    }

    pub(crate) fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// The individual field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message reported for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(&error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Sign-up
// =============================================================================

/// Body of `POST /api/sign-up`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A sign-up payload that passed validation.
pub struct SignUp {
    pub username: Username,
    pub email: Email,
    pub password: String,
}

impl SignUpRequest {
    /// Check all three fields.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint.
    pub fn validate(&self) -> Result<SignUp, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let username = Username::parse(&self.username)
            .map_err(|e| errors.push("username", e.to_string()))
            .ok();
        let email = Email::parse(&self.email)
            .map_err(|_| errors.push("email", "Invalid email address"))
            .ok();
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        match (username, email) {
            (Some(username), Some(email)) => errors.into_result(|| SignUp {
                username,
                email,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Username availability
// =============================================================================

/// Query string of `GET /api/check-username-unique`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameQuery {
    #[serde(default)]
    pub username: String,
}

impl UsernameQuery {
    /// Check the username constraints.
    ///
    /// # Errors
    ///
    /// Returns the username constraint that failed.
    pub fn validate(&self) -> Result<Username, ValidationErrors> {
        Username::parse(&self.username).map_err(|e| {
            let mut errors = ValidationErrors::default();
            errors.push("username", e.to_string());
            errors
        })
    }
}

// =============================================================================
// Verification
// =============================================================================

/// Body of `POST /api/verify-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub username: String,
    pub code: String,
}

/// A verification payload that passed validation.
#[derive(Debug)]
pub struct VerifyCode {
    pub username: Username,
    pub code: VerificationCode,
}

impl VerifyCodeRequest {
    /// Check the username and the code format.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint.
    pub fn validate(&self) -> Result<VerifyCode, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let username = Username::parse(&self.username)
            .map_err(|e| errors.push("username", e.to_string()))
            .ok();
        let code = VerificationCode::parse(&self.code)
            .map_err(|e| errors.push("code", e.to_string()))
            .ok();

        match (username, code) {
            (Some(username), Some(code)) => Ok(VerifyCode { username, code }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Message acceptance
// =============================================================================

/// Body of `POST /api/accept-messages`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessageRequest {
    pub accept_message: bool,
}

// =============================================================================
// Anonymous messages
// =============================================================================

/// Body of `POST /api/send-message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub content: String,
}

/// A message payload that passed validation.
#[derive(Debug)]
pub struct SendMessage {
    pub username: Username,
    pub content: String,
}

impl SendMessageRequest {
    /// Check the recipient and the content length (after trimming).
    ///
    /// # Errors
    ///
    /// Returns every violated constraint.
    pub fn validate(&self) -> Result<SendMessage, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let username = Username::parse(&self.username)
            .map_err(|e| errors.push("username", e.to_string()))
            .ok();

        let content = self.content.trim();
        let len = content.chars().count();
        if len < MIN_MESSAGE_LENGTH {
            errors.push(
                "content",
                format!("Content must be at least {MIN_MESSAGE_LENGTH} characters"),
            );
        } else if len > MAX_MESSAGE_LENGTH {
            errors.push(
                "content",
                format!("Content must not be longer than {MAX_MESSAGE_LENGTH} characters"),
            );
        }

        match username {
            Some(username) => errors.into_result(|| SendMessage {
                username,
                content: content.to_owned(),
            }),
            None => Err(errors),
        }
    }
}
