//! Anonymous message domain type.

use chrono::{DateTime, Utc};

use true_feedback_core::payloads::MessageView;
use true_feedback_core::{MessageId, UserId};

/// A message left for a user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: MessageId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            content: message.content,
            created_at: message.created_at,
        }
    }
}
