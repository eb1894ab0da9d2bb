//! The JSON response envelope shared by every API endpoint.
//!
//! ```json
//! { "success": true, "message": "...", "isAcceptingMessages": true }
//! ```
//!
//! `success` is the discriminant, `message` is always present, and the
//! payload's fields (if any) are flattened next to them so existing clients
//! keep reading e.g. `isAcceptingMessages` at the top level.

use serde::{Deserialize, Serialize};

/// Response envelope: discriminant, message, optional flattened payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = NoPayload> {
    /// `true` for 2xx responses.
    pub success: bool,
    /// Human-readable outcome, shown to the user as-is.
    pub message: String,
    /// Endpoint-specific fields.
    #[serde(flatten)]
    pub data: Option<T>,
}

/// Payload type for envelopes that carry only a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoPayload {}

impl<T> ApiResponse<T> {
    /// A successful envelope carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A failed envelope.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Convert into a `Result`, keeping the message on both sides.
    ///
    /// # Errors
    ///
    /// Returns the message when `success` is false.
    pub fn into_result(self) -> Result<(String, Option<T>), String> {
        if self.success {
            Ok((self.message, self.data))
        } else {
            Err(self.message)
        }
    }
}

impl ApiResponse<NoPayload> {
    /// A successful envelope with only a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}
