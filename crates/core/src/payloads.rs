//! Payloads carried inside [`ApiResponse`](crate::ApiResponse) envelopes.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, MessageId, UserId, Username};

/// Public view of a user record. Never carries credentials or codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub created_at: DateTime<Utc>,
}

/// `POST /api/accept-messages` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUser {
    pub updated_user: UserProfile,
}

/// `GET /api/accept-messages` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesStatus {
    pub is_accepting_messages: bool,
}

/// One anonymous message as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: MessageId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /api/get-messages` payload, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesPayload {
    pub messages: Vec<MessageView>,
}

/// `POST /api/suggest-messages` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsPayload {
    /// Model output exactly as returned.
    pub suggestions: String,
    /// `suggestions` split on the `||` delimiter.
    pub questions: Vec<String>,
}
