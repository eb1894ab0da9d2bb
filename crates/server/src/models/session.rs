//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use true_feedback_core::sign_in::SessionUser;
use true_feedback_core::{Email, UserId, Username};

use super::User;

/// Session-stored user identity.
///
/// A snapshot taken at sign-in. Handlers that need authoritative state read
/// the store by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_verified: user.is_verified,
            is_accepting_messages: user.is_accepting_messages,
        }
    }
}

impl From<CurrentUser> for SessionUser {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            is_accepting_messages: user.is_accepting_messages,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
